//! Comment threading.
//!
//! Comments arrive as a flat list where each reply points at its parent
//! through `inReplyTo`. The UI wants a pre-order walk of the thread with an
//! indentation level per comment, newest first on every level.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use jiff::Timestamp;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::model::Entity;

/// Normalized comment record.
///
/// Built from the feed entity; the parent is kept as the embedded reference
/// the feed gave us, which may be a stub holding little more than an id.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Comment {
    #[serde(rename = "oae:id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Entity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "oae:threadKey")]
    pub thread_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<i64>,
    #[serde(rename = "inReplyTo", skip_serializing_if = "Option::is_none")]
    pub in_reply_to: Option<Box<Comment>>,
    #[serde(flatten)]
    pub others: BTreeMap<String, Value>,
}

impl Comment {
    /// Properties the comment record does not interpret, such as
    /// `displayName` or `image`, end up in `others`.
    pub fn from_entity(entity: &Entity) -> Comment {
        let mut rest = entity.clone();
        let id = std::mem::take(&mut rest.id);
        let author = rest.author.take().map(|author| *author);
        let content = rest.content.take();
        let thread_key = rest.thread_key.take().unwrap_or_default();
        let published = rest.published.take().and_then(|p| p.as_millis());
        let in_reply_to = rest
            .in_reply_to
            .take()
            .map(|parent| Box::new(Comment::from_entity(&parent)));
        let others = match serde_json::to_value(&rest) {
            Ok(Value::Object(properties)) => properties.into_iter().collect(),
            _ => rest.others,
        };
        Comment {
            id,
            author,
            content,
            thread_key,
            published,
            in_reply_to,
            others,
        }
    }
    pub fn parent_id(&self) -> Option<&str> {
        self.in_reply_to.as_deref().map(|parent| parent.id.as_str())
    }
    pub fn published_at(&self) -> Option<Timestamp> {
        self.published
            .and_then(|millis| Timestamp::from_millisecond(millis).ok())
    }
    /// Creation part of the thread key, the token after the last `#`.
    pub fn thread_key_suffix(&self) -> &str {
        self.thread_key
            .rsplit_once('#')
            .map_or(self.thread_key.as_str(), |(_, created)| created)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LeveledComment {
    pub level: usize,
    pub comment: Comment,
}

fn newest_first(a: &Comment, b: &Comment) -> Ordering {
    b.thread_key_suffix().cmp(a.thread_key_suffix())
}

/// Flatten `comments` into a leveled pre-order walk of their threads.
///
/// A reply whose parent is not part of `comments` is shown as a top-level
/// comment. The input is never modified, so calling this again on the same
/// slice yields the same output.
pub fn construct_comment_tree(comments: &[Comment]) -> Vec<LeveledComment> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(comments.len());
    for (position, comment) in comments.iter().enumerate() {
        index.entry(comment.id.as_str()).or_insert(position);
    }

    let mut replies: Vec<Vec<usize>> = vec![Vec::new(); comments.len()];
    let mut top_level = Vec::new();
    for (position, comment) in comments.iter().enumerate() {
        match comment.parent_id().and_then(|id| index.get(id)) {
            Some(&parent) => replies[parent].push(position),
            None => top_level.push(position),
        }
    }

    let mut tree = Vec::with_capacity(comments.len());
    let mut pending: Vec<(usize, usize)> = Vec::new();
    push_newest_last(comments, &top_level, 0, &mut pending);
    while let Some((position, level)) = pending.pop() {
        tree.push(LeveledComment {
            level,
            comment: comments[position].clone(),
        });
        push_newest_last(comments, &replies[position], level + 1, &mut pending);
    }
    tree
}

/// Queue `siblings` on the walk stack so the newest one is popped first.
fn push_newest_last(
    comments: &[Comment],
    siblings: &[usize],
    level: usize,
    pending: &mut Vec<(usize, usize)>,
) {
    let mut siblings = siblings.to_vec();
    siblings.sort_by(|&a, &b| newest_first(&comments[a], &comments[b]));
    pending.extend(siblings.into_iter().rev().map(|position| (position, level)));
}

/// Leveled preview of the newest one or two comments and their ancestors.
///
/// `comments` must be sorted newest first. At most four comments end up in
/// the preview: the two newest ones, their parents and, when the second
/// newest is the parent of the newest, its own parent.
pub fn construct_latest_comment_tree(comments: &[Comment]) -> Vec<LeveledComment> {
    let Some(newest) = comments.first() else {
        return Vec::new();
    };

    let mut latest: Vec<Comment> = vec![newest.clone()];
    if let Some(parent) = newest.in_reply_to.as_deref() {
        latest.push(find_original_comment(parent, comments).clone());
    }

    if let Some(second) = comments.get(1) {
        match latest.iter().position(|c| c.id == second.id) {
            None => {
                latest.push(second.clone());
                if let Some(parent) = second.in_reply_to.as_deref() {
                    if !contains(&latest, &parent.id) {
                        latest.push(find_original_comment(parent, comments).clone());
                    }
                }
            }
            Some(included) => {
                let grandparent = latest[included].in_reply_to.as_deref().cloned();
                if let Some(grandparent) = grandparent {
                    if !contains(&latest, &grandparent.id) {
                        latest.push(find_original_comment(&grandparent, comments).clone());
                    }
                }
            }
        }
    }

    construct_comment_tree(&latest)
}

fn contains(comments: &[Comment], id: &str) -> bool {
    comments.iter().any(|c| c.id == id)
}

/// Full record of `reference` from `comments`, or `reference` itself when
/// the full record is not part of the working set anymore.
pub fn find_original_comment<'a>(reference: &'a Comment, comments: &'a [Comment]) -> &'a Comment {
    match comments.iter().find(|c| c.id == reference.id) {
        Some(original) => original,
        None => {
            debug!(target: "prepare", id = %reference.id, "comment parent not in working set, using reference");
            reference
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use serde_json::json;

    use crate::activity::model::Entity;

    use super::{
        Comment, LeveledComment, construct_comment_tree, construct_latest_comment_tree,
        find_original_comment,
    };

    fn comment(id: &str, thread_key: &str, parent: Option<&str>) -> Comment {
        Comment {
            id: id.to_string(),
            author: None,
            content: Some(format!("comment {id}")),
            thread_key: thread_key.to_string(),
            published: None,
            in_reply_to: parent.map(|parent| {
                Box::new(Comment {
                    id: parent.to_string(),
                    author: None,
                    content: None,
                    thread_key: String::new(),
                    published: None,
                    in_reply_to: None,
                    others: Default::default(),
                })
            }),
            others: Default::default(),
        }
    }

    fn shape(tree: &[LeveledComment]) -> Vec<(usize, &str)> {
        tree.iter()
            .map(|c| (c.level, c.comment.id.as_str()))
            .collect()
    }

    #[test]
    fn top_level_sorted_newest_first() {
        let comments = [
            comment("a", "100|", None),
            comment("c", "300|", None),
            comment("b", "200|", None),
        ];
        let tree = construct_comment_tree(&comments);
        assert_eq!(shape(&tree), [(0, "c"), (0, "b"), (0, "a")]);
    }

    #[test]
    fn replies_follow_their_parent() {
        let comments = [
            comment("a", "100|", None),
            comment("b", "100#200|", Some("a")),
            comment("c", "100#300|", Some("a")),
            comment("d", "400|", None),
            comment("e", "100#200#250|", Some("b")),
        ];
        let tree = construct_comment_tree(&comments);
        assert_eq!(
            shape(&tree),
            [(0, "d"), (0, "a"), (1, "c"), (1, "b"), (2, "e")]
        );
    }

    #[test]
    fn orphaned_reply_is_top_level() {
        let comments = [
            comment("b", "100#200|", Some("gone")),
            comment("c", "300|", None),
        ];
        let tree = construct_comment_tree(&comments);
        assert_eq!(shape(&tree), [(0, "c"), (0, "b")]);
    }

    #[test]
    fn construct_is_idempotent() {
        let comments = [
            comment("a", "100|", None),
            comment("b", "100#200|", Some("a")),
            comment("c", "300|", None),
        ];
        let first = construct_comment_tree(&comments);
        let second = construct_comment_tree(&comments);
        assert_eq!(first, second);
    }

    #[test]
    fn published_is_normalized() -> Result<()> {
        let entity: Entity = serde_json::from_value(json!({
            "oae:id": "c:cam:1",
            "oae:threadKey": "1500|",
            "published": "1500",
            "objectType": "comment"
        }))?;
        let comment = Comment::from_entity(&entity);
        assert_eq!(comment.published, Some(1500));
        assert!(comment.published_at().is_some());
        let value = serde_json::to_value(&comment)?;
        assert_eq!(value["published"], json!(1500));
        assert_eq!(value["objectType"], json!("comment"));
        Ok(())
    }

    #[test]
    fn thread_key_suffix() {
        assert_eq!(comment("a", "100|", None).thread_key_suffix(), "100|");
        assert_eq!(comment("a", "100#200|", None).thread_key_suffix(), "200|");
        assert_eq!(comment("a", "1#2#3|", None).thread_key_suffix(), "3|");
        assert_eq!(comment("a", "", None).thread_key_suffix(), "");
    }

    #[test]
    fn latest_includes_ancestors() {
        let comments = [
            comment("c", "100#200#300|", Some("b")),
            comment("b", "100#200|", Some("a")),
            comment("a", "100|", None),
        ];
        let tree = construct_latest_comment_tree(&comments);
        assert_eq!(shape(&tree), [(0, "a"), (1, "b"), (2, "c")]);
    }

    #[test]
    fn latest_two_top_level_comments() {
        let comments = [
            comment("y", "300|", None),
            comment("x", "200|", None),
            comment("w", "100|", None),
        ];
        let tree = construct_latest_comment_tree(&comments);
        assert_eq!(shape(&tree), [(0, "y"), (0, "x")]);
    }

    #[test]
    fn latest_with_two_parents() {
        let comments = [
            comment("d", "200#400|", Some("b")),
            comment("c", "100#300|", Some("a")),
            comment("b", "200|", None),
            comment("a", "100|", None),
        ];
        let tree = construct_latest_comment_tree(&comments);
        assert_eq!(shape(&tree), [(0, "b"), (1, "d"), (0, "a"), (1, "c")]);
    }

    #[test]
    fn latest_shares_parent_once() {
        let comments = [
            comment("c", "100#300|", Some("a")),
            comment("b", "100#200|", Some("a")),
            comment("a", "100|", None),
        ];
        let tree = construct_latest_comment_tree(&comments);
        assert_eq!(shape(&tree), [(0, "a"), (1, "c"), (1, "b")]);
    }

    #[test]
    fn latest_falls_back_to_parent_reference() {
        let comments = [
            comment("c", "100#300|", Some("a")),
            comment("d", "500|", None),
        ];
        let tree = construct_latest_comment_tree(&comments);
        assert_eq!(shape(&tree), [(0, "d"), (0, "a"), (1, "c")]);
        assert_eq!(tree[1].comment.content, None);
    }

    #[test]
    fn latest_of_nothing() {
        assert!(construct_latest_comment_tree(&[]).is_empty());
    }

    #[test]
    fn original_comment_lookup() {
        let comments = [comment("a", "100|", None)];
        let stub = comment("a", "", None);
        let original = find_original_comment(&stub, &comments);
        assert_eq!(original.content.as_deref(), Some("comment a"));

        let missing = comment("z", "", None);
        assert_eq!(find_original_comment(&missing, &comments), &missing);
    }

    #[test]
    fn uninterpreted_properties_are_kept() -> Result<()> {
        let entity: Entity = serde_json::from_value(json!({
            "objectType": "comment",
            "oae:id": "c:cam:2",
            "displayName": "Re: minutes",
            "oae:profilePath": "/content/cam/doc",
            "oae:tenant": { "alias": "cam", "displayName": "Cambridge" },
            "image": { "url": "/api/download/c2" },
            "oae:messageBoxId": "d:cam:doc",
            "content": "Agreed",
            "oae:threadKey": "1000#2000|",
            "published": "2000",
            "author": { "objectType": "user", "oae:id": "u:cam:abc", "displayName": "Simon" },
            "inReplyTo": { "oae:id": "c:cam:1", "displayName": "Minutes" }
        }))?;
        let comment = Comment::from_entity(&entity);
        assert_eq!(comment.id, "c:cam:2");
        assert_eq!(comment.author.as_ref().map(|a| a.id.as_str()), Some("u:cam:abc"));
        assert_eq!(comment.parent_id(), Some("c:cam:1"));
        for typed in ["oae:id", "content", "oae:threadKey", "published", "author", "inReplyTo"] {
            assert!(!comment.others.contains_key(typed), "{typed} kept twice");
        }

        let value = serde_json::to_value(&comment)?;
        assert_eq!(value["displayName"], json!("Re: minutes"));
        assert_eq!(value["oae:profilePath"], json!("/content/cam/doc"));
        assert_eq!(value["oae:tenant"]["alias"], json!("cam"));
        assert_eq!(value["image"]["url"], json!("/api/download/c2"));
        assert_eq!(value["oae:messageBoxId"], json!("d:cam:doc"));
        assert_eq!(value["content"], json!("Agreed"));
        assert_eq!(value["inReplyTo"]["displayName"], json!("Minutes"));
        Ok(())
    }

    #[test]
    fn very_deep_reply_chain() {
        let depth = 100_000;
        let comments: Vec<Comment> = (0..depth)
            .map(|i| {
                let parent = (i > 0).then(|| format!("c{}", i - 1));
                comment(&format!("c{i}"), &format!("{i}|"), parent.as_deref())
            })
            .collect();
        let tree = construct_comment_tree(&comments);
        assert_eq!(tree.len(), depth);
        assert_eq!(tree[0].comment.id, "c0");
        assert_eq!(tree[depth - 1].level, depth - 1);
        assert_eq!(tree[depth - 1].comment.id, format!("c{}", depth - 1));
    }

    #[test]
    fn reply_cycles_are_not_walked() {
        let comments = [
            comment("a", "100|", Some("b")),
            comment("b", "200|", Some("a")),
            comment("s", "300|", Some("s")),
            comment("t", "400|", None),
        ];
        let tree = construct_comment_tree(&comments);
        assert_eq!(shape(&tree), [(0, "t")]);
    }
}
