//! Time and timestamp helpers.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// UTC timestamp used for `last_seen`, `created_at`, reading times, etc.
pub type Timestamp = DateTime<Utc>;

/// Render a timestamp for display in tables and cards.
#[must_use]
pub fn display(ts: &Timestamp) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Render an optional timestamp, using an em dash when absent.
#[must_use]
pub fn display_opt(ts: Option<&Timestamp>) -> String {
    ts.map_or_else(|| "\u{2014}".to_string(), display)
}

/// Deserialize an optional timestamp, tolerating naive (offset-less) values
/// and treating anything unparseable as absent.
///
/// # Errors
///
/// Only fails when the underlying value is not a string or null.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_lenient))
}

fn parse_lenient(raw: &str) -> Option<Timestamp> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
