//! Structural normalization of an activity before it is summarized.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::comments::{
    Comment, LeveledComment, construct_comment_tree, construct_latest_comment_tree,
};
use super::model::{Activity, CurrentUser, Entities, MediaLink, Published};
use super::order::order_entities;

/// Activity types whose object is a set of comments.
pub const COMMENT_ACTIVITY_TYPES: [&str; 4] = [
    "content-comment",
    "discussion-message",
    "folder-comment",
    "meeting-jitsi-message",
];

pub fn is_comment_activity(activity_type: &str) -> bool {
    COMMENT_ACTIVITY_TYPES.contains(&activity_type)
}

/// An activity with ordered collections and threaded comments.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PreparedActivity {
    #[serde(rename = "oae:activityType")]
    pub activity_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<Published>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<Entities>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<PreparedObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Entities>,
    #[serde(flatten)]
    pub others: BTreeMap<String, Value>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum PreparedObject {
    Entities(Entities),
    Comments(CommentThread),
}

impl PreparedObject {
    pub fn entities(&self) -> Option<&Entities> {
        match self {
            PreparedObject::Entities(entities) => Some(entities),
            PreparedObject::Comments(_) => None,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CommentThread {
    #[serde(rename = "objectType")]
    object_type: &'static str,
    #[serde(rename = "oae:collection")]
    pub collection: Vec<LeveledComment>,
    #[serde(rename = "latestComments")]
    pub latest_comments: Vec<LeveledComment>,
}

impl CommentThread {
    pub fn from_entities(entities: &Entities) -> CommentThread {
        let mut comments: Vec<Comment> = entities.iter().map(Comment::from_entity).collect();
        comments.sort_by(|a, b| b.published.cmp(&a.published));
        CommentThread {
            object_type: "comments",
            collection: construct_comment_tree(&comments),
            latest_comments: construct_latest_comment_tree(&comments),
        }
    }
}

/// Order collections, refresh the current user's pictures and thread
/// comments. The given activity is left untouched.
pub fn prepare_activity(current_user: &CurrentUser, activity: &Activity) -> PreparedActivity {
    let actor = activity.actor.clone().map(|mut actor| {
        refresh_actor_pictures(current_user, &mut actor);
        order_entities(&mut actor);
        actor
    });
    let object = activity.object.as_ref().map(|object| {
        if is_comment_activity(&activity.activity_type) {
            let thread = CommentThread::from_entities(object);
            debug!(target: "prepare", comments = thread.collection.len(), "threaded comments");
            PreparedObject::Comments(thread)
        } else {
            let mut object = object.clone();
            order_entities(&mut object);
            PreparedObject::Entities(object)
        }
    });
    let target = activity.target.clone().map(|mut target| {
        order_entities(&mut target);
        target
    });

    PreparedActivity {
        activity_type: activity.activity_type.clone(),
        verb: activity.verb.clone(),
        published: activity.published.clone(),
        actor,
        object,
        target,
        others: activity.others.clone(),
    }
}

/// The feed may carry an outdated thumbnail of the current user; use the
/// pictures we know are current instead.
fn refresh_actor_pictures(current_user: &CurrentUser, actor: &mut Entities) {
    for entity in actor.iter_mut().filter(|entity| current_user.is(entity)) {
        if let Some(small) = &current_user.small_picture {
            refresh_url(&mut entity.image, small);
        }
        if let Some(medium) = &current_user.medium_picture {
            refresh_url(&mut entity.wide_image, medium);
        }
    }
}

fn refresh_url(link: &mut Option<MediaLink>, url: &str) {
    link.get_or_insert_with(MediaLink::default).url = Some(url.to_string());
}
