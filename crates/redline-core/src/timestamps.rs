//! Timestamp helpers for revision and comment dates.
//!
//! Marks and comments carry ISO-8601 dates. New ones are stamped in UTC with
//! second precision; listings show parseable dates as `YYYY-MM-DD HH:MM:SS`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Current UTC time in the form written into revision and comment attributes.
#[must_use]
pub fn now_iso() -> String {
    format_iso(Utc::now())
}

#[must_use]
pub fn format_iso(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Display form of a stored date. Offset-less ISO dates are shown as
/// written, without conversion. Unparseable values are returned verbatim;
/// empty values become `None`.
#[must_use]
pub fn display(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.format(DISPLAY_FORMAT).to_string());
    }
    let local = LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        });
    Some(local.map_or_else(
        || trimmed.to_string(),
        |parsed| parsed.format(DISPLAY_FORMAT).to_string(),
    ))
}
