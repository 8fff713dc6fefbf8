//! Serde presentation of the OAE activity stream.
//!
//! The feed follows <http://activitystrea.ms> loosely: actor, object and
//! target are either one entity or an `oae:collection` of entities. Fields
//! we do not interpret are kept in `others` so a prepared activity can be
//! handed back to the UI without losing anything.

mod activity;
mod entity;
mod user;

pub use activity::{Activity, ActivityStreamPage, Published};
pub use entity::{Entities, Entity, EntityCollection, MediaLink, Tenant};
pub use user::CurrentUser;

use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use serde_json::Value;

/// Field deserializer that turns a value of the wrong shape into the
/// default instead of rejecting the whole record.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}
