use serde::{Deserialize, Serialize};

use super::Entity;

/// The user looking at the activity stream.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: String,
    pub small_picture: Option<String>,
    pub medium_picture: Option<String>,
    pub large_picture: Option<String>,
}

impl CurrentUser {
    pub fn new(id: impl Into<String>) -> CurrentUser {
        CurrentUser {
            id: id.into(),
            ..Default::default()
        }
    }
    /// Anonymous users have no id and are never part of an activity.
    pub fn is(&self, entity: &Entity) -> bool {
        !self.id.is_empty() && entity.id == self.id
    }
}
