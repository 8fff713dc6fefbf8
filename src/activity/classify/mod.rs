//! Selection of the message template describing an activity.
//!
//! Every activity type maps to a handler through [`HANDLERS`]; types we do
//! not know about get the default template, which carries the verb so the
//! UI can still say something sensible. Template identifiers are keys into
//! the UI message bundles and are never resolved here.

mod content;
mod discussion;
mod folder;
mod following;
mod group;
mod invitation;
mod meeting;

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;
use tracing::debug;

use super::model::{CurrentUser, Entities, Entity};
use super::prepare::PreparedActivity;
use super::summary::{Cardinality, SummaryProperties};

#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("{0:?} is not an invitation activity type")]
    InvalidInvitationType(String),
}

/// Template identifier plus the values it interpolates.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ActivitySummary {
    #[serde(rename = "templateId")]
    pub template_id: String,
    pub properties: SummaryProperties,
}

pub(crate) struct Context<'a> {
    pub(crate) me: &'a CurrentUser,
    pub(crate) activity: &'a PreparedActivity,
    pub(crate) properties: &'a SummaryProperties,
}

type Handler = fn(&Context<'_>) -> Result<String, ClassifyError>;

static HANDLERS: LazyLock<HashMap<&'static str, Handler>> = LazyLock::new(|| {
    HashMap::from([
        ("content-comment", content::comment as Handler),
        ("content-create", content::create),
        ("content-restored-revision", content::restored_revision),
        ("content-revision", content::revision),
        ("content-share", content::share),
        ("content-update", content::update),
        ("content-update-member-role", content::update_member_role),
        ("content-update-visibility", content::update_visibility),
        ("discussion-create", discussion::create),
        ("discussion-message", discussion::message),
        ("discussion-share", discussion::share),
        ("discussion-update", discussion::update),
        ("discussion-update-member-role", discussion::update_member_role),
        ("discussion-update-visibility", discussion::update_visibility),
        ("folder-add-to-folder", folder::add_to_folder),
        ("folder-comment", folder::comment),
        ("folder-create", folder::create),
        ("folder-share", folder::share),
        ("folder-update", folder::update),
        ("folder-update-member-role", folder::update_member_role),
        ("folder-update-visibility", folder::update_visibility),
        ("following-follow", following::follow),
        ("group-add-member", group::add_member),
        ("group-create", group::create),
        ("group-join", group::join),
        ("group-update", group::update),
        ("group-update-member-role", group::update_member_role),
        ("group-update-visibility", group::update_visibility),
        ("invitation-accept", invitation::invitation),
        ("invite", invitation::invitation),
        ("meeting-jitsi-create", meeting::create),
        ("meeting-jitsi-message", meeting::message),
        ("meeting-jitsi-share", meeting::share),
        ("meeting-jitsi-update", meeting::update),
        ("meeting-jitsi-update-member-role", meeting::update_member_role),
        ("meeting-jitsi-update-visibility", meeting::update_visibility),
    ])
});

/// Whether the activity type has a dedicated template family.
pub fn is_known_activity_type(activity_type: &str) -> bool {
    HANDLERS.contains_key(activity_type)
}

pub fn classify(
    me: &CurrentUser,
    activity: &PreparedActivity,
    mut properties: SummaryProperties,
) -> Result<ActivitySummary, ClassifyError> {
    let template_id = match HANDLERS.get(activity.activity_type.as_str()) {
        Some(handler) => handler(&Context {
            me,
            activity,
            properties: &properties,
        })?,
        None => {
            debug!(target: "summary", activity_type = %activity.activity_type, "no template family, using default");
            properties.verb = activity.verb.clone();
            template(&["DEFAULT", properties.actor_count().label()])
        }
    };
    debug!(target: "summary", activity_type = %activity.activity_type, %template_id, "classified activity");
    Ok(ActivitySummary {
        template_id,
        properties,
    })
}

/// `ACTIVITY_` followed by the non-empty parts joined with `_`.
pub(super) fn template(parts: &[&str]) -> String {
    std::iter::once("ACTIVITY")
        .chain(parts.iter().copied().filter(|part| !part.is_empty()))
        .collect::<Vec<_>>()
        .join("_")
}

/// Label of the content kinds that have their own messages.
pub(super) fn resource_label(entity: &Entity) -> Option<&'static str> {
    match entity.sub_type.as_deref()? {
        "collabdoc" => Some("COLLABDOC"),
        "collabsheet" => Some("COLLABSHEET"),
        "file" => Some("FILE"),
        "link" => Some("LINK"),
        _ => None,
    }
}

pub(super) fn visibility_label(entity: Option<&Entity>) -> &'static str {
    match entity.and_then(|entity| entity.visibility.as_deref()) {
        Some("public") => "PUBLIC",
        Some("loggedin") => "LOGGEDIN",
        _ => "PRIVATE",
    }
}

impl Context<'_> {
    pub(super) fn actor_count(&self) -> Cardinality {
        self.properties.actor_count()
    }
    pub(super) fn object_count(&self) -> Cardinality {
        self.properties.object_count()
    }
    pub(super) fn target_count(&self) -> Cardinality {
        self.properties.target_count()
    }
    pub(super) fn objects(&self) -> Option<&Entities> {
        self.activity.object.as_ref().and_then(|object| object.entities())
    }
    pub(super) fn single_object(&self) -> Option<&Entity> {
        self.objects().and_then(Entities::single)
    }
    pub(super) fn single_target(&self) -> Option<&Entity> {
        self.activity.target.as_ref().and_then(Entities::single)
    }
    pub(super) fn object_is_you(&self) -> bool {
        self.single_object().is_some_and(|object| self.me.is(object))
    }
    pub(super) fn target_is_you(&self) -> bool {
        self.single_target().is_some_and(|target| self.me.is(target))
    }
    /// Where something was created, when that changes the message: for you,
    /// in a folder or in a group. Creating something for another user reads
    /// like a plain create.
    pub(super) fn location(&self) -> Option<&'static str> {
        let target = self.single_target()?;
        if self.me.is(target) {
            Some("YOU")
        } else if target.type_is("folder") {
            Some("FOLDER")
        } else if target.type_is("group") {
            Some("GROUP")
        } else {
            None
        }
    }
    /// Sub-type label of the object when there is exactly one.
    pub(super) fn object_resource(&self) -> Option<&'static str> {
        self.single_object().and_then(resource_label)
    }
    /// Sub-type label of the target when there is exactly one.
    pub(super) fn target_resource(&self) -> Option<&'static str> {
        self.single_target().and_then(resource_label)
    }
}

/// `<FAMILY>_CREATE[_SUB]_<YOU|FOLDER|GROUP|count of objects>`
pub(super) fn created_in(ctx: &Context<'_>, family: &str, resource: Option<&str>) -> String {
    let suffix = ctx
        .location()
        .unwrap_or_else(|| ctx.object_count().label());
    template(&[family, "CREATE", resource.unwrap_or_default(), suffix])
}

/// `<FAMILY>_<ACTION>[_SUB]_<count of actors>`
pub(super) fn by_actors(ctx: &Context<'_>, family: &str, action: &str, resource: Option<&str>) -> String {
    template(&[family, action, resource.unwrap_or_default(), ctx.actor_count().label()])
}

/// One object shared with you or with 1, 2 or more targets; or several
/// objects shared, possibly with you.
pub(super) fn shared(ctx: &Context<'_>, family: &str, resource: Option<&str>) -> String {
    let you = if ctx.target_is_you() { "YOU" } else { "" };
    if ctx.object_count() == Cardinality::One {
        let suffix = if you.is_empty() { ctx.target_count().label() } else { you };
        template(&[family, "SHARE", resource.unwrap_or_default(), suffix])
    } else {
        template(&[family, "SHARE", ctx.object_count().label(), you])
    }
}

/// Role change of one or more members, `YOU` when it is your role.
pub(super) fn member_role(ctx: &Context<'_>, family: &str, resource: Option<&str>) -> String {
    let suffix = if ctx.object_is_you() {
        "YOU"
    } else {
        ctx.object_count().label()
    };
    template(&[family, "UPDATE_MEMBER_ROLE", resource.unwrap_or_default(), suffix])
}

pub(super) fn visibility(ctx: &Context<'_>, family: &str) -> String {
    let object = ctx.objects().and_then(Entities::first);
    template(&[family, "VISIBILITY", visibility_label(object)])
}
