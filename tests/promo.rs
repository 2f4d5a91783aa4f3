use chrono::NaiveDate;
use usher::promo::{validate, DiscountKind, PromoDraft, PromoField, PromoScope};
use uuid::Uuid;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

fn draft(code: &str, value: &str) -> PromoDraft {
    PromoDraft {
        code: code.to_string(),
        kind: DiscountKind::Percentage,
        value: value.to_string(),
        expires: String::new(),
        scope: PromoScope::All,
        group_ids: Vec::new(),
        tier_ids: Vec::new(),
    }
}

#[test]
fn test_valid_percentage_promo() {
    let valid = validate(&draft("summer25", "25"), today()).unwrap();
    assert_eq!(valid.code, "SUMMER25");
    assert_eq!(valid.discount_percentage, Some(25.0));
    assert_eq!(valid.discount_in_cents, None);
    assert_eq!(valid.expires_on, None);
    assert_eq!(valid.scope, PromoScope::All);
}

#[test]
fn test_flat_discount_converts_to_cents() {
    let mut d = draft("FLAT10", "10.50");
    d.kind = DiscountKind::Flat;
    let valid = validate(&d, today()).unwrap();
    assert_eq!(valid.discount_in_cents, Some(1050));
    assert_eq!(valid.discount_percentage, None);
}

#[test]
fn test_code_is_required_and_alphanumeric() {
    let errors = validate(&draft("", "25"), today()).unwrap_err();
    assert!(errors.iter().any(|e| e.field == PromoField::Code));

    let errors = validate(&draft("HALF OFF", "25"), today()).unwrap_err();
    assert!(errors.iter().any(|e| e.field == PromoField::Code));

    let errors = validate(&draft("SAVE-10", "25"), today()).unwrap_err();
    assert!(errors.iter().any(|e| e.field == PromoField::Code));
}

#[test]
fn test_code_whitespace_is_trimmed_before_checks() {
    let valid = validate(&draft("  vip  ", "5"), today()).unwrap();
    assert_eq!(valid.code, "VIP");
}

#[test]
fn test_percentage_bounds() {
    assert!(validate(&draft("A", "0.5"), today()).is_err());
    assert!(validate(&draft("A", "101"), today()).is_err());
    assert!(validate(&draft("A", "-5"), today()).is_err());
    assert!(validate(&draft("A", "1"), today()).is_ok());
    assert!(validate(&draft("A", "100"), today()).is_ok());
}

#[test]
fn test_flat_bounds() {
    let mut d = draft("A", "0.50");
    d.kind = DiscountKind::Flat;
    assert!(validate(&d, today()).is_err());

    d.value = "10001".to_string();
    assert!(validate(&d, today()).is_err());

    d.value = "1".to_string();
    assert!(validate(&d, today()).is_ok());

    d.value = "10000".to_string();
    assert!(validate(&d, today()).is_ok());
}

#[test]
fn test_discount_must_be_numeric() {
    let errors = validate(&draft("A", "ten"), today()).unwrap_err();
    assert!(errors.iter().any(|e| e.field == PromoField::Value));

    let errors = validate(&draft("A", "NaN"), today()).unwrap_err();
    assert!(errors.iter().any(|e| e.field == PromoField::Value));
}

#[test]
fn test_expiry_parsing_and_past_rejection() {
    let mut d = draft("A", "25");

    d.expires = "2025-07-01".to_string();
    let valid = validate(&d, today()).unwrap();
    assert_eq!(valid.expires_on, NaiveDate::from_ymd_opt(2025, 7, 1));

    // Expiring today is allowed; only strictly past dates fail
    d.expires = "2025-06-15".to_string();
    assert!(validate(&d, today()).is_ok());

    d.expires = "2025-06-14".to_string();
    let errors = validate(&d, today()).unwrap_err();
    assert!(errors.iter().any(|e| e.field == PromoField::Expires));

    d.expires = "july 1st".to_string();
    let errors = validate(&d, today()).unwrap_err();
    assert!(errors.iter().any(|e| e.field == PromoField::Expires));
}

#[test]
fn test_scoped_promos_need_selections() {
    let mut d = draft("A", "25");
    d.scope = PromoScope::Groups;
    let errors = validate(&d, today()).unwrap_err();
    assert!(errors.iter().any(|e| e.field == PromoField::Scope));

    d.group_ids = vec![Uuid::new_v4()];
    assert!(validate(&d, today()).is_ok());

    let mut d = draft("A", "25");
    d.scope = PromoScope::Tiers;
    let errors = validate(&d, today()).unwrap_err();
    assert!(errors.iter().any(|e| e.field == PromoField::Scope));
}

#[test]
fn test_unused_scope_ids_are_dropped() {
    // Stale selections from a previous scope choice do not get stored
    let mut d = draft("A", "25");
    d.group_ids = vec![Uuid::new_v4()];
    d.tier_ids = vec![Uuid::new_v4()];

    let valid = validate(&d, today()).unwrap();
    assert!(valid.group_ids.is_empty());
    assert!(valid.tier_ids.is_empty());

    d.scope = PromoScope::Groups;
    let valid = validate(&d, today()).unwrap();
    assert_eq!(valid.group_ids.len(), 1);
    assert!(valid.tier_ids.is_empty());
}

#[test]
fn test_disabled_scope_still_validates_discount() {
    let mut d = draft("A", "200");
    d.scope = PromoScope::Disabled;
    let errors = validate(&d, today()).unwrap_err();
    assert!(errors.iter().any(|e| e.field == PromoField::Value));
}

#[test]
fn test_all_violations_reported_at_once() {
    let mut d = draft("bad code!", "0");
    d.expires = "2020-01-01".to_string();
    let errors = validate(&d, today()).unwrap_err();
    assert!(errors.iter().any(|e| e.field == PromoField::Code));
    assert!(errors.iter().any(|e| e.field == PromoField::Value));
    assert!(errors.iter().any(|e| e.field == PromoField::Expires));
}

#[test]
fn test_into_args_shapes_the_row() {
    let event_id = Uuid::new_v4();
    let mut d = draft("vip", "15");
    d.expires = "2025-12-31".to_string();
    let args = validate(&d, today()).unwrap().into_args(event_id);
    assert_eq!(args.event_id, event_id);
    assert_eq!(args.code, "VIP");
    assert_eq!(args.discount_percentage, Some(15.0));
    assert_eq!(args.expires_on.as_deref(), Some("2025-12-31"));
    assert_eq!(args.scope, "all");
}
