//! Jitsi meetings.

use super::{ClassifyError, Context, by_actors, created_in, member_role, shared, visibility};

const FAMILY: &str = "MEETING_JITSI";

pub(super) fn create(ctx: &Context<'_>) -> Result<String, ClassifyError> {
    Ok(created_in(ctx, FAMILY, None))
}

pub(super) fn update(ctx: &Context<'_>) -> Result<String, ClassifyError> {
    Ok(by_actors(ctx, FAMILY, "UPDATE", None))
}

pub(super) fn message(ctx: &Context<'_>) -> Result<String, ClassifyError> {
    Ok(by_actors(ctx, FAMILY, "MESSAGE", None))
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
