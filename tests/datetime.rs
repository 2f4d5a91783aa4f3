use chrono::{Duration, NaiveDate};
use usher::utils::datetime::{
    format_human_date, format_human_datetime, format_ymd, is_strictly_past, parse_date, today,
};

#[test]
fn test_parse_date_accepts_ymd() {
    let date = parse_date("2025-06-15").unwrap();
    assert_eq!(date, NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
}

#[test]
fn test_parse_date_rejects_other_shapes() {
    assert!(parse_date("15/06/2025").is_err());
    assert!(parse_date("2025-6-15").is_err());
    assert!(parse_date("june 15").is_err());
    assert!(parse_date("").is_err());
}

#[test]
fn test_format_ymd_roundtrip() {
    let date = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
    assert_eq!(format_ymd(date), "2025-01-03");
    assert_eq!(parse_date(&format_ymd(date)).unwrap(), date);
}

#[test]
fn test_strictly_past_excludes_the_reference_day() {
    let reference = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
    assert!(is_strictly_past(reference - Duration::days(1), reference));
    assert!(!is_strictly_past(reference, reference));
    assert!(!is_strictly_past(reference + Duration::days(1), reference));
}

#[test]
fn test_human_date_relative_days() {
    let today = today();
    assert_eq!(format_human_date(&format_ymd(today)), "today");
    assert_eq!(
        format_human_date(&format_ymd(today + Duration::days(1))),
        "tomorrow"
    );
    assert_eq!(
        format_human_date(&format_ymd(today - Duration::days(1))),
        "yesterday"
    );
}

#[test]
fn test_human_date_nearby_weekdays() {
    let today = today();
    let ahead = today + Duration::days(3);
    assert_eq!(
        format_human_date(&format_ymd(ahead)),
        format!("next {}", ahead.format("%A"))
    );

    let behind = today - Duration::days(3);
    assert_eq!(
        format_human_date(&format_ymd(behind)),
        format!("last {}", behind.format("%A"))
    );
}

#[test]
fn test_human_date_counts_days_within_a_month() {
    let today = today();
    assert_eq!(
        format_human_date(&format_ymd(today + Duration::days(10))),
        "in 10 days"
    );
    assert_eq!(
        format_human_date(&format_ymd(today - Duration::days(10))),
        "10 days ago"
    );
}

#[test]
fn test_human_date_spells_out_far_dates() {
    // More than a year out always lands in a different calendar year.
    let far = today() + Duration::days(400);
    assert_eq!(format_human_date(&format_ymd(far)), far.format("%b %d, %Y").to_string());

    assert_eq!(format_human_date("2020-03-01"), "Mar 01, 2020");
}

#[test]
fn test_human_date_passes_through_unparseable_input() {
    assert_eq!(format_human_date("not-a-date"), "not-a-date");
    assert_eq!(format_human_date("soon"), "soon");
}

#[test]
fn test_human_datetime_appends_wall_clock_time() {
    assert_eq!(
        format_human_datetime("2020-03-01T14:30:00"),
        "Mar 01, 2020 at 14:30"
    );
    assert_eq!(
        format_human_datetime("2020-03-01 09:05:00"),
        "Mar 01, 2020 at 09:05"
    );
}

#[test]
fn test_human_datetime_accepts_rfc3339() {
    let rendered = format_human_datetime("2020-03-01T14:30:00Z");
    assert!(rendered.contains(" at "));
}

#[test]
fn test_human_datetime_falls_back_to_date_only() {
    assert_eq!(format_human_datetime("2020-03-01"), "Mar 01, 2020");
    assert_eq!(format_human_datetime("gibberish"), "gibberish");
}
