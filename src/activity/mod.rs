//! Activity summaries for the activity stream UI.
//!
//! An activity goes through [`prepare::prepare_activity`] (ordering,
//! comment threading), then [`summary::SummaryProperties`] (counts and
//! display fields) and finally [`classify::classify`] (template selection).

pub mod classify;
pub mod comments;
pub mod model;
pub mod order;
pub mod prepare;
pub mod sanitize;
pub mod summary;

use serde::Deserialize;

pub use self::classify::{ActivitySummary, ClassifyError, classify};

use self::model::{Activity, ActivityStreamPage, CurrentUser};
use self::prepare::{PreparedActivity, prepare_activity};
use self::sanitize::AmmoniaSanitizer;
use self::summary::SummaryProperties;

#[derive(Clone, Default, Debug, Deserialize)]
#[serde(default)]
pub struct SummaryOptions {
    /// Link every entity to this URL instead of its profile path.
    pub resource_href_override: Option<String>,
    /// Escape entity values before building link markup, see
    /// [`summary::describe_sanitized_entity`].
    pub sanitize: bool,
}

pub fn summarize(
    me: &CurrentUser,
    activity: &Activity,
    options: &SummaryOptions,
) -> Result<ActivitySummary, ClassifyError> {
    let prepared = prepare_activity(me, activity);
    summarize_prepared(me, &prepared, options)
}

pub fn summarize_prepared(
    me: &CurrentUser,
    prepared: &PreparedActivity,
    options: &SummaryOptions,
) -> Result<ActivitySummary, ClassifyError> {
    let url_override = options.resource_href_override.as_deref();
    let properties = if options.sanitize {
        SummaryProperties::from_activity_sanitized(prepared, url_override, &AmmoniaSanitizer)
    } else {
        SummaryProperties::from_activity(prepared, url_override)
    };
    classify(me, prepared, properties)
}

/// Summaries of a whole page, in page order. A failing activity does not
/// affect the others.
pub fn summarize_page(
    me: &CurrentUser,
    page: &ActivityStreamPage,
    options: &SummaryOptions,
) -> Vec<Result<ActivitySummary, ClassifyError>> {
    page.items
        .iter()
        .map(|activity| summarize(me, activity, options))
        .collect()
}
