use super::{ClassifyError, Context, by_actors, created_in, member_role, shared, template, visibility};

const FAMILY: &str = "FOLDER";

pub(super) fn create(ctx: &Context<'_>) -> Result<String, ClassifyError> {
    Ok(created_in(ctx, FAMILY, None))
}

pub(super) fn update(ctx: &Context<'_>) -> Result<String, ClassifyError> {
    Ok(by_actors(ctx, FAMILY, "UPDATE", None))
}

pub(super) fn comment(ctx: &Context<'_>) -> Result<String, ClassifyError> {
    Ok(by_actors(ctx, FAMILY, "COMMENT", None))
}

/// Content items (the objects) added to a folder (the target).
pub(super) fn add_to_folder(ctx: &Context<'_>) -> Result<String, ClassifyError> {
    Ok(template(&[
        FAMILY,
        "ADD_TO_FOLDER",
        ctx.object_resource().unwrap_or_default(),
        ctx.object_count().label(),
    ]))
}

pub(super) fn share(ctx: &Context<'_>) -> Result<String, ClassifyError> {
    Ok(shared(ctx, FAMILY, None))
}

pub(super) fn update_member_role(ctx: &Context<'_>) -> Result<String, ClassifyError> {
    Ok(member_role(ctx, FAMILY, None))
}

pub(super) fn update_visibility(ctx: &Context<'_>) -> Result<String, ClassifyError> {
    Ok(visibility(ctx, FAMILY))
}
