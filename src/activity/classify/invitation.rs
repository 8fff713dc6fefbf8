//! Invitations to a resource and their acceptance.
//!
//! The template identifier is put together from labels instead of being
//! picked from a fixed list: the action and who was involved, the kind of
//! resource and how many resources there were, e.g.
//! `ACTIVITY_INVITATION_ACCEPT_YOU_OTHER_GROUP_1`.

use tracing::warn;

use super::{ClassifyError, Context, resource_label, template};
use crate::activity::model::Entities;

pub(super) fn invitation(ctx: &Context<'_>) -> Result<String, ClassifyError> {
    let action = match ctx.activity.activity_type.as_str() {
        "invite" => "INVITE",
        "invitation-accept" => "INVITATION_ACCEPT",
        other => {
            warn!(target: "summary", activity_type = other, "not an invitation activity");
            return Err(ClassifyError::InvalidInvitationType(other.to_string()));
        }
    };

    let actor = ctx.activity.actor.as_ref().and_then(Entities::first);
    let object = ctx.objects().and_then(Entities::first);
    let who = if actor.is_some_and(|actor| ctx.me.is(actor)) {
        "YOU_OTHER"
    } else if object.is_some_and(|object| ctx.me.is(object)) {
        "OTHER_YOU"
    } else {
        "OTHER_OTHER"
    };

    let mut resource = ctx
        .activity
        .target
        .as_ref()
        .and_then(Entities::first)
        .and_then(|target| target.object_type.as_deref())
        .unwrap_or_default()
        .to_uppercase();
    if resource == "CONTENT" {
        if let Some(sub_type) = ctx.single_target().and_then(resource_label) {
            resource = sub_type.to_string();
        }
    }

    Ok(template(&[action, who, resource.as_str(), ctx.target_count().label()]))
}
