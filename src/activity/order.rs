//! Ordering of actor, object and target collections.

use std::cmp::Ordering;

use super::model::{Entities, Entity};

/// Reorder a collection so the most recently changed entity comes first and
/// entities with a thumbnail come before those without.
///
/// The feed appends the entity that changed last, so the collection is
/// reversed before a stable image-first sort.
pub fn order_collection(mut entities: Vec<Entity>) -> Vec<Entity> {
    entities.reverse();
    entities.sort_by(image_first);
    entities
}

fn image_first(a: &Entity, b: &Entity) -> Ordering {
    match (a.has_image(), b.has_image()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Order `entities` in place when it is a collection of more than one.
pub(crate) fn order_entities(entities: &mut Entities) {
    if let Entities::Collection(collection) = entities {
        if collection.items.len() > 1 {
            let items = std::mem::take(&mut collection.items);
            collection.items = order_collection(items);
        }
    }
}
