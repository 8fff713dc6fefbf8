use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{Published, lenient};

/// An actor, object or target of an activity.
///
/// Comments travel through the feed as entities too, which is why the
/// comment-only properties (`content`, `oae:threadKey`, `author`,
/// `inReplyTo`) live here.
///
/// Every field reads leniently: a value of the wrong type leaves that field
/// empty and the rest of the entity intact.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Entity {
    #[serde(
        rename = "oae:id",
        deserialize_with = "lenient",
        skip_serializing_if = "String::is_empty"
    )]
    pub id: String,
    #[serde(rename = "objectType", deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    #[serde(rename = "displayName", deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(
        rename = "oae:profilePath",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub profile_path: Option<String>,
    #[serde(rename = "oae:tenant", deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub tenant: Option<Tenant>,
    #[serde(
        rename = "oae:resourceSubType",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub sub_type: Option<String>,
    #[serde(
        rename = "oae:visibility",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub visibility: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub image: Option<MediaLink>,
    #[serde(
        rename = "oae:wideImage",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub wide_image: Option<MediaLink>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(
        rename = "oae:threadKey",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub thread_key: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub published: Option<Published>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub author: Option<Box<Entity>>,
    #[serde(rename = "inReplyTo", deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub in_reply_to: Option<Box<Entity>>,
    #[serde(flatten)]
    pub others: BTreeMap<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Tenant {
    #[serde(deserialize_with = "lenient")]
    pub alias: String,
    #[serde(rename = "displayName", deserialize_with = "lenient")]
    pub display_name: String,
    #[serde(rename = "isGuestTenant", deserialize_with = "lenient")]
    pub is_guest_tenant: bool,
    #[serde(rename = "isPrivate", deserialize_with = "lenient")]
    pub is_private: bool,
}

/// Thumbnail descriptor of `image` and `oae:wideImage`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct MediaLink {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub width: Option<u64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
}

impl Entity {
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
    pub fn type_is(&self, object_type: &str) -> bool {
        self.object_type.as_deref() == Some(object_type)
    }
    pub fn sub_type_is(&self, sub_type: &str) -> bool {
        self.sub_type.as_deref() == Some(sub_type)
    }
}

/// One entity, or a `oae:collection` of them.
///
/// Anything carrying an `oae:collection` key is a collection, everything
/// else is read as a single entity. Values that are not objects at all
/// become empty entities, so a collection keeps its length.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Entities {
    Collection(EntityCollection),
    Single(Box<Entity>),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EntityCollection {
    #[serde(rename = "objectType")]
    pub object_type: String,
    #[serde(rename = "oae:collection")]
    pub items: Vec<Entity>,
}

impl<'de> Deserialize<'de> for Entities {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut value = Value::deserialize(deserializer)?;
        let Some(collection) = value.get_mut("oae:collection").map(Value::take) else {
            return Ok(Entities::from(entity_or_default(value)));
        };
        let items = match collection {
            Value::Array(items) => items.into_iter().map(entity_or_default).collect(),
            other => {
                debug!(target: "prepare", collection = %other, "oae:collection is not an array");
                Vec::new()
            }
        };
        let object_type = value
            .get("objectType")
            .and_then(Value::as_str)
            .map_or_else(EntityCollection::default_type, str::to_string);
        Ok(Entities::Collection(EntityCollection { object_type, items }))
    }
}

fn entity_or_default(item: Value) -> Entity {
    Entity::deserialize(item).unwrap_or_else(|error| {
        debug!(target: "prepare", %error, "unreadable entity, using an empty one");
        Entity::default()
    })
}

impl EntityCollection {
    pub fn new(items: Vec<Entity>) -> EntityCollection {
        EntityCollection {
            object_type: Self::default_type(),
            items,
        }
    }
    fn default_type() -> String {
        "collection".to_string()
    }
}

impl Entities {
    pub fn is_collection(&self) -> bool {
        matches!(self, Entities::Collection(_))
    }
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
    pub fn first(&self) -> Option<&Entity> {
        self.as_slice().first()
    }
    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.as_slice().get(index)
    }
    pub fn as_slice(&self) -> &[Entity] {
        match self {
            Entities::Collection(collection) => &collection.items,
            Entities::Single(entity) => std::slice::from_ref(entity.as_ref()),
        }
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.as_slice().iter()
    }
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Entity> {
        match self {
            Entities::Collection(collection) => collection.items.iter_mut(),
            Entities::Single(entity) => std::slice::from_mut(entity.as_mut()).iter_mut(),
        }
    }
    /// The only entity, when there is exactly one.
    pub fn single(&self) -> Option<&Entity> {
        match self.as_slice() {
            [entity] => Some(entity),
            _ => None,
        }
    }
}

impl From<Entity> for Entities {
    fn from(entity: Entity) -> Self {
        Entities::Single(Box::new(entity))
    }
}

impl From<Vec<Entity>> for Entities {
    fn from(items: Vec<Entity>) -> Self {
        Entities::Collection(EntityCollection::new(items))
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use serde_json::json;

    use super::{Entities, Entity};

    #[test]
    fn single_entity_with_unknown_properties() -> Result<()> {
        let value = json!({
            "objectType": "user",
            "oae:id": "u:cam:abc",
            "id": "http://cam.oae.com/api/user/u:cam:abc",
            "displayName": "Simon",
            "oae:profilePath": "/user/cam/abc",
            "oae:tenant": {
                "alias": "cam",
                "displayName": "Cambridge",
                "isGuestTenant": false
            },
            "oae:visibility": "public",
            "image": { "url": "/api/download/abc", "width": 32, "height": 32 }
        });
        let entities: Entities = serde_json::from_value(value.clone())?;
        assert!(!entities.is_collection());
        assert_eq!(entities.len(), 1);

        let entity = entities.single().unwrap();
        assert_eq!(entity.id, "u:cam:abc");
        assert!(entity.type_is("user"));
        assert!(entity.has_image());
        assert_eq!(entity.tenant.as_ref().unwrap().display_name, "Cambridge");
        assert_eq!(
            entity.others.get("id"),
            Some(&json!("http://cam.oae.com/api/user/u:cam:abc"))
        );
        assert_eq!(serde_json::to_value(&entities)?, value_with_tenant_flags(value));
        Ok(())
    }

    fn value_with_tenant_flags(mut value: serde_json::Value) -> serde_json::Value {
        value["oae:tenant"]["isPrivate"] = json!(false);
        value
    }

    #[test]
    fn oae_collection_is_a_collection() -> Result<()> {
        let entities: Entities = serde_json::from_value(json!({
            "objectType": "collection",
            "oae:collection": [
                { "oae:id": "c:cam:1", "displayName": "One" },
                { "oae:id": "c:cam:2", "displayName": "Two" }
            ]
        }))?;
        assert!(entities.is_collection());
        assert_eq!(entities.len(), 2);
        assert!(entities.single().is_none());
        assert_eq!(entities.get(1).map(|e| e.id.as_str()), Some("c:cam:2"));
        Ok(())
    }

    #[test]
    fn missing_display_name_is_tolerated() -> Result<()> {
        let entity: Entity = serde_json::from_value(json!({ "oae:id": "c:cam:1" }))?;
        assert_eq!(entity.display_name, None);
        assert!(!entity.has_image());
        Ok(())
    }

    #[test]
    fn comment_shaped_entity() -> Result<()> {
        let entity: Entity = serde_json::from_value(json!({
            "objectType": "comment",
            "oae:id": "c:cam:2",
            "content": "Agreed",
            "oae:threadKey": "1000#2000|",
            "published": "2000",
            "inReplyTo": { "oae:id": "c:cam:1" }
        }))?;
        assert_eq!(entity.thread_key.as_deref(), Some("1000#2000|"));
        assert_eq!(entity.in_reply_to.as_ref().map(|p| p.id.as_str()), Some("c:cam:1"));
        assert_eq!(entity.published.as_ref().and_then(|p| p.as_millis()), Some(2000));
        Ok(())
    }

    #[test]
    fn wrong_typed_item_keeps_collection_length() -> Result<()> {
        let entities: Entities = serde_json::from_value(json!({
            "objectType": "collection",
            "oae:collection": [
                { "oae:id": "u:cam:1", "displayName": "One" },
                { "oae:id": "u:cam:2", "displayName": "Two", "image": { "url": "/x", "width": "32" } },
                "u:cam:3",
                { "oae:id": "u:cam:4", "displayName": 4, "oae:tenant": "cam" }
            ]
        }))?;
        assert!(entities.is_collection());
        assert_eq!(entities.len(), 4);

        let second = entities.get(1).unwrap();
        assert_eq!(second.display_name.as_deref(), Some("Two"));
        let image = second.image.as_ref().unwrap();
        assert_eq!(image.url.as_deref(), Some("/x"));
        assert_eq!(image.width, None);

        assert_eq!(entities.get(2), Some(&Entity::default()));

        let fourth = entities.get(3).unwrap();
        assert_eq!(fourth.id, "u:cam:4");
        assert_eq!(fourth.display_name, None);
        assert_eq!(fourth.tenant, None);
        Ok(())
    }

    #[test]
    fn collection_key_decides_the_shape() -> Result<()> {
        let empty: Entities = serde_json::from_value(json!({ "oae:collection": [] }))?;
        assert!(empty.is_collection());
        assert!(empty.is_empty());

        let not_an_array: Entities = serde_json::from_value(json!({ "oae:collection": "oops" }))?;
        assert!(not_an_array.is_collection());
        assert!(not_an_array.is_empty());

        let single: Entities = serde_json::from_value(json!({ "oae:id": "u:cam:1", "displayName": [] }))?;
        assert!(!single.is_collection());
        assert_eq!(single.first().map(|e| e.id.as_str()), Some("u:cam:1"));
        Ok(())
    }
}
