//! Display formatting helpers.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Format an appointment date-time as `5 Mar 2025, 14:30`.
///
/// Missing values and the API's `Unknown` placeholder render as `N/A`.
/// Offsets are kept as sent: the wall-clock time in the stored offset is shown.
/// Strings that are not a recognisable date are shown verbatim.
pub fn format_date(value: Option<&str>) -> String {
    let raw = match value.map(str::trim) {
        None | Some("") | Some("Unknown") => return "N/A".to_string(),
        Some(raw) => raw,
    };

    parse_date_time(raw)
        .map(|dt| dt.format("%-d %b %Y, %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
