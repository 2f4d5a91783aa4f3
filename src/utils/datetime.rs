//! Date parsing and human-readable date rendering.
//!
//! Expiry checks and roster columns work in whole local days. Event start
//! times come back from the API in a few shapes, so the datetime formatter
//! tries each before giving up and echoing the input.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Date-only wire format shared with the API.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str, DATE_FORMAT)
}

pub fn format_ymd(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

/// Current local date, the reference point for expiry checks.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whether `date` lies strictly before `reference`. A promo code expiring
/// today is still live.
pub fn is_strictly_past(date: NaiveDate, reference: NaiveDate) -> bool {
    date < reference
}

/// Render a `YYYY-MM-DD` date relative to today: "tomorrow", "next Friday",
/// "in 12 days", falling back to "Jun 03" (or "Jun 03, 2027" across a year
/// boundary) once the gap stops being meaningful at a glance. Unparseable
/// input comes back unchanged so raw API values still show something.
pub fn format_human_date(date_str: &str) -> String {
    let Ok(date) = parse_date(date_str) else {
        return date_str.to_string();
    };

    let today = today();
    let days = (date - today).num_days();

    match days {
        -1 => "yesterday".into(),
        0 => "today".into(),
        1 => "tomorrow".into(),
        2..=7 => format!("next {}", date.format("%A")),
        -7..=-2 => format!("last {}", date.format("%A")),
        8..=30 => format!("in {} days", days),
        -30..=-8 => format!("{} days ago", -days),
        _ if date.year() == today.year() => date.format("%b %d").to_string(),
        _ => date.format("%b %d, %Y").to_string(),
    }
}

/// Render an event start in human form: the date part goes through
/// [`format_human_date`], the wall-clock time rides along as "at HH:MM".
///
/// Accepts RFC3339 (`2025-01-15T14:30:00Z`), bare ISO 8601, and the
/// space-separated variant. Date-only strings fall back to the date
/// renderer, anything else is echoed unchanged.
pub fn format_human_datetime(datetime_str: &str) -> String {
    let Some(local) = parse_local(datetime_str) else {
        return format_human_date(datetime_str);
    };

    let date = format_human_date(&local.format(DATE_FORMAT).to_string());
    format!("{} at {}", date, local.format("%H:%M"))
}

fn parse_local(s: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    // Timestamps without an offset are read as local wall-clock time.
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()?;
    Some(
        Local
            .from_local_datetime(&naive)
            .single()
            .unwrap_or_else(|| Local.from_utc_datetime(&naive)),
    )
}
