use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Entities, lenient};

/// One page of `/api/activity`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ActivityStreamPage {
    pub items: Vec<Activity>,
    #[serde(rename = "nextToken", skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Activity {
    #[serde(rename = "oae:activityType", deserialize_with = "lenient")]
    pub activity_type: String,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub verb: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub published: Option<Published>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<Entities>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<Entities>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Entities>,
    #[serde(flatten)]
    pub others: BTreeMap<String, Value>,
}

impl Activity {
    pub fn published_at(&self) -> Option<Timestamp> {
        self.published.as_ref().and_then(Published::to_timestamp)
    }
}

/// Epoch milliseconds, as a number or as the string the REST API stores.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Published {
    Millis(i64),
    Fractional(f64),
    Text(String),
}

impl Published {
    /// Integer value, parsed the lenient way: `"1500abc"` is `1500`, a value
    /// without leading digits is `None`.
    pub fn as_millis(&self) -> Option<i64> {
        match self {
            Published::Millis(millis) => Some(*millis),
            Published::Fractional(millis) if millis.is_finite() => Some(millis.trunc() as i64),
            Published::Fractional(_) => None,
            Published::Text(text) => parse_int_prefix(text),
        }
    }
    pub fn to_timestamp(&self) -> Option<Timestamp> {
        self.as_millis()
            .and_then(|millis| Timestamp::from_millisecond(millis).ok())
    }
}

fn parse_int_prefix(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}
