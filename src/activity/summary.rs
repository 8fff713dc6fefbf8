//! Display properties of the entities taking part in an activity.
//!
//! The message catalog refers to `actor1Link`, `objectCount` and friends.
//! [`SummaryProperties`] keeps them as typed records per role and only
//! flattens them into those keys when serialized.
//!
//! [`describe_entity`] builds link markup from the raw entity values; its
//! output must be treated as untrusted. [`describe_sanitized_entity`] runs
//! every value through a [`Sanitizer`] first.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::model::{Entities, Entity};
use super::prepare::{PreparedActivity, PreparedObject};
use super::sanitize::Sanitizer;

/// Count bucket that picks the pluralized message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    One,
    Two,
    Many,
}

impl Cardinality {
    pub fn from_count(count: usize) -> Cardinality {
        match count {
            0 | 1 => Cardinality::One,
            2 => Cardinality::Two,
            _ => Cardinality::Many,
        }
    }
    /// Suffix used in template identifiers.
    pub fn label(self) -> &'static str {
        match self {
            Cardinality::One => "1",
            Cardinality::Two => "2",
            Cardinality::Many => "2+",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySummary {
    pub display_name: String,
    pub url: Option<String>,
    pub link: String,
    pub tenant: Option<String>,
}

/// Display fields of a single entity.
///
/// `url_override` replaces the profile path, e.g. to point every link at
/// the same page in an email.
pub fn describe_entity(entity: &Entity, url_override: Option<&str>) -> EntitySummary {
    let display_name = entity.display_name.clone().unwrap_or_default();
    let url = entity_url(entity, url_override);
    EntitySummary {
        link: link_markup(&display_name, url.as_deref()),
        display_name,
        url,
        tenant: tenant_name(entity),
    }
}

/// [`describe_entity`] with escaped values. The URL property is URL-encoded;
/// only its copy inside the `href` attribute is attribute-escaped as well.
pub fn describe_sanitized_entity(
    entity: &Entity,
    url_override: Option<&str>,
    sanitizer: &impl Sanitizer,
) -> EntitySummary {
    let display_name = sanitizer.encode_for_html(entity.display_name.as_deref().unwrap_or_default());
    let url = entity_url(entity, url_override).map(|url| sanitizer.encode_for_url(&url));
    let href = url
        .as_deref()
        .map(|url| sanitizer.encode_for_html_attribute(url));
    EntitySummary {
        link: link_markup(&display_name, href.as_deref()),
        display_name,
        url,
        tenant: tenant_name(entity).map(|tenant| sanitizer.encode_for_html(&tenant)),
    }
}

fn entity_url(entity: &Entity, url_override: Option<&str>) -> Option<String> {
    url_override
        .map(str::to_string)
        .or_else(|| entity.profile_path.clone())
}

fn tenant_name(entity: &Entity) -> Option<String> {
    entity
        .tenant
        .as_ref()
        .map(|tenant| tenant.display_name.clone())
}

fn link_markup(display_name: &str, href: Option<&str>) -> String {
    match href {
        Some(href) if !href.is_empty() => format!("<a href=\"{href}\">{display_name}</a>"),
        _ => format!("<span>{display_name}</span>"),
    }
}

/// Count and the first two entities of one role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSummary {
    pub count: usize,
    pub entities: Vec<EntitySummary>,
}

impl RoleSummary {
    pub fn from_entities(entities: &Entities, url_override: Option<&str>) -> RoleSummary {
        Self::described(entities, &|entity: &Entity| describe_entity(entity, url_override))
    }
    fn described(entities: &Entities, describe: &dyn Fn(&Entity) -> EntitySummary) -> RoleSummary {
        RoleSummary {
            count: entities.len(),
            entities: entities.iter().take(2).map(describe).collect(),
        }
    }
    pub fn cardinality(&self) -> Cardinality {
        Cardinality::from_count(self.count)
    }
    pub fn count_minus_one(&self) -> Option<usize> {
        (self.count >= 2).then(|| self.count - 1)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryProperties {
    pub actor: Option<RoleSummary>,
    pub object: Option<RoleSummary>,
    pub target: Option<RoleSummary>,
    pub verb: Option<String>,
}

impl SummaryProperties {
    /// Count every role and describe its first two entities.
    ///
    /// A comment thread object is counted but not described. An activity
    /// without target gets no target properties at all.
    pub fn from_activity(activity: &PreparedActivity, url_override: Option<&str>) -> Self {
        Self::described(activity, &|entity: &Entity| describe_entity(entity, url_override))
    }
    /// [`SummaryProperties::from_activity`] with every entity described by
    /// [`describe_sanitized_entity`].
    pub fn from_activity_sanitized(
        activity: &PreparedActivity,
        url_override: Option<&str>,
        sanitizer: &impl Sanitizer,
    ) -> Self {
        Self::described(activity, &|entity: &Entity| {
            describe_sanitized_entity(entity, url_override, sanitizer)
        })
    }
    fn described(activity: &PreparedActivity, describe: &dyn Fn(&Entity) -> EntitySummary) -> Self {
        let object = activity.object.as_ref().map(|object| match object {
            PreparedObject::Entities(entities) => RoleSummary::described(entities, describe),
            PreparedObject::Comments(thread) => RoleSummary {
                count: thread.collection.len(),
                entities: Vec::new(),
            },
        });
        SummaryProperties {
            actor: activity
                .actor
                .as_ref()
                .map(|actor| RoleSummary::described(actor, describe)),
            object,
            target: activity
                .target
                .as_ref()
                .map(|target| RoleSummary::described(target, describe)),
            verb: None,
        }
    }
    pub fn actor_count(&self) -> Cardinality {
        count_of(&self.actor)
    }
    pub fn object_count(&self) -> Cardinality {
        count_of(&self.object)
    }
    pub fn target_count(&self) -> Cardinality {
        count_of(&self.target)
    }
}

fn count_of(role: &Option<RoleSummary>) -> Cardinality {
    Cardinality::from_count(role.as_ref().map_or(0, |role| role.count))
}

impl Serialize for SummaryProperties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (role, summary) in [
            ("actor", &self.actor),
            ("object", &self.object),
            ("target", &self.target),
        ] {
            let Some(summary) = summary else {
                continue;
            };
            map.serialize_entry(&format!("{role}Count"), &summary.count)?;
            if let Some(minus_one) = summary.count_minus_one() {
                map.serialize_entry(&format!("{role}CountMinusOne"), &minus_one)?;
            }
            for (index, entity) in summary.entities.iter().enumerate() {
                let key = format!("{role}{}", index + 1);
                map.serialize_entry(&key, &entity.display_name)?;
                if let Some(url) = &entity.url {
                    map.serialize_entry(&format!("{key}URL"), url)?;
                }
                map.serialize_entry(&format!("{key}Link"), &entity.link)?;
                if let Some(tenant) = &entity.tenant {
                    map.serialize_entry(&format!("{key}Tenant"), tenant)?;
                }
            }
        }
        if let Some(verb) = &self.verb {
            map.serialize_entry("verb", verb)?;
        }
        map.end()
    }
}
