//! Files, links and collaborative documents.

use super::{ClassifyError, Context, by_actors, created_in, member_role, shared, visibility};

const FAMILY: &str = "CONTENT";

pub(super) fn create(ctx: &Context<'_>) -> Result<String, ClassifyError> {
    Ok(created_in(ctx, FAMILY, ctx.object_resource()))
}

pub(super) fn update(ctx: &Context<'_>) -> Result<String, ClassifyError> {
    Ok(by_actors(ctx, FAMILY, "UPDATE", ctx.object_resource()))
}

pub(super) fn revision(ctx: &Context<'_>) -> Result<String, ClassifyError> {
    Ok(by_actors(ctx, FAMILY, "REVISION", ctx.object_resource()))
}

pub(super) fn restored_revision(ctx: &Context<'_>) -> Result<String, ClassifyError> {
    Ok(by_actors(ctx, FAMILY, "RESTORED_REVISION", ctx.object_resource()))
}

/// The commented content item is the target.
pub(super) fn comment(ctx: &Context<'_>) -> Result<String, ClassifyError> {
    Ok(by_actors(ctx, FAMILY, "COMMENT", ctx.target_resource()))
}

pub(super) fn share(ctx: &Context<'_>) -> Result<String, ClassifyError> {
    Ok(shared(ctx, FAMILY, ctx.object_resource()))
}

pub(super) fn update_member_role(ctx: &Context<'_>) -> Result<String, ClassifyError> {
    Ok(member_role(ctx, FAMILY, ctx.target_resource()))
}

pub(super) fn update_visibility(ctx: &Context<'_>) -> Result<String, ClassifyError> {
    Ok(visibility(ctx, FAMILY))
}
