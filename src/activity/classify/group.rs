use super::{ClassifyError, Context, by_actors, member_role, template, visibility};

const FAMILY: &str = "GROUP";

pub(super) fn create(ctx: &Context<'_>) -> Result<String, ClassifyError> {
    Ok(template(&[FAMILY, "CREATE", ctx.object_count().label()]))
}

pub(super) fn update(ctx: &Context<'_>) -> Result<String, ClassifyError> {
    Ok(by_actors(ctx, FAMILY, "UPDATE", None))
}

pub(super) fn join(ctx: &Context<'_>) -> Result<String, ClassifyError> {
    Ok(by_actors(ctx, FAMILY, "JOIN", None))
}

/// Users (the objects) added to a group (the target).
pub(super) fn add_member(ctx: &Context<'_>) -> Result<String, ClassifyError> {
    let suffix = if ctx.object_is_you() {
        "YOU"
    } else {
        ctx.object_count().label()
    };
    Ok(template(&[FAMILY, "ADD_MEMBER", suffix]))
}

pub(super) fn update_member_role(ctx: &Context<'_>) -> Result<String, ClassifyError> {
    Ok(member_role(ctx, FAMILY, None))
}

pub(super) fn update_visibility(ctx: &Context<'_>) -> Result<String, ClassifyError> {
    Ok(visibility(ctx, FAMILY))
}
