//! Promo code drafts and validation.
//!
//! Validation is pure and stateless: the dialog hands in whatever the user
//! typed plus today's date and gets back either a normalized, storable promo
//! or a list of field-keyed errors. The dialog decides when errors become
//! visible (only after an attempted submit) and refuses to submit while any
//! remain.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::constants::{
    CENTS_PER_DOLLAR, PROMO_CODE_MAX_LEN, PROMO_FLAT_MAX_DOLLARS, PROMO_FLAT_MIN_DOLLARS, PROMO_PERCENT_MAX,
    PROMO_PERCENT_MIN,
};
use crate::models::PromoCodeArgs;
use crate::utils::datetime;

/// How the discount is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountKind {
    /// Percent off the order total, 1 to 100.
    Percentage,
    /// Fixed amount off in dollars, stored in cents.
    Flat,
}

impl Default for DiscountKind {
    fn default() -> Self {
        Self::Percentage
    }
}

impl DiscountKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Percentage => "Percentage",
            Self::Flat => "Flat amount",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Percentage => Self::Flat,
            Self::Flat => Self::Percentage,
        }
    }
}

/// What the code applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoScope {
    /// Every ticket on the event.
    All,
    /// Only the selected ticket groups.
    Groups,
    /// Only the selected ticket tiers.
    Tiers,
    /// Stored but not redeemable.
    Disabled,
}

impl Default for PromoScope {
    fn default() -> Self {
        Self::All
    }
}

impl PromoScope {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Groups => "groups",
            Self::Tiers => "tiers",
            Self::Disabled => "disabled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All tickets",
            Self::Groups => "Ticket groups",
            Self::Tiers => "Ticket tiers",
            Self::Disabled => "Disabled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "groups" => Some(Self::Groups),
            "tiers" => Some(Self::Tiers),
            "disabled" => Some(Self::Disabled),
            _ => None,
        }
    }

    /// Cycle order used by the dialog's scope field.
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Groups,
            Self::Groups => Self::Tiers,
            Self::Tiers => Self::Disabled,
            Self::Disabled => Self::All,
        }
    }
}

/// Raw form state as typed, before any validation.
#[derive(Debug, Clone, Default)]
pub struct PromoDraft {
    pub code: String,
    pub kind: DiscountKind,
    pub value: String,
    pub expires: String,
    pub scope: PromoScope,
    pub group_ids: Vec<Uuid>,
    pub tier_ids: Vec<Uuid>,
}

/// Field a validation error is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromoField {
    Code,
    Value,
    Expires,
    Scope,
}

/// One validation failure, positioned next to its field in the dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: PromoField,
    pub message: String,
}

impl FieldError {
    fn new(field: PromoField, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// A draft that passed validation, normalized for storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidPromo {
    pub code: String,
    pub discount_percentage: Option<f64>,
    pub discount_in_cents: Option<i64>,
    pub expires_on: Option<NaiveDate>,
    pub scope: PromoScope,
    pub group_ids: Vec<Uuid>,
    pub tier_ids: Vec<Uuid>,
}

impl ValidPromo {
    /// Shape for the insert/update against the promo_codes table.
    pub fn into_args(self, event_id: Uuid) -> PromoCodeArgs {
        PromoCodeArgs {
            event_id,
            code: self.code,
            discount_percentage: self.discount_percentage,
            discount_in_cents: self.discount_in_cents,
            expires_on: self.expires_on.map(datetime::format_ymd),
            scope: self.scope.as_str().to_string(),
            ticket_group_ids: self.group_ids,
            ticket_tier_ids: self.tier_ids,
        }
    }
}

/// Whether the code input should accept another character.
///
/// The input layer truncates at the cap instead of letting validation
/// complain about length later.
pub fn code_at_capacity(code: &str) -> bool {
    code.chars().count() >= PROMO_CODE_MAX_LEN
}

/// Validate a draft against `today`.
///
/// Returns the normalized promo (trimmed uppercased code, cents conversion
/// for flat discounts, parsed expiry) or every rule violation at once. The
/// discount is validated for every scope including `Disabled`: the stored
/// value must stay meaningful for a later re-enable.
pub fn validate(draft: &PromoDraft, today: NaiveDate) -> Result<ValidPromo, Vec<FieldError>> {
    let mut errors = Vec::new();

    let code = draft.code.trim();
    if code.is_empty() {
        errors.push(FieldError::new(PromoField::Code, "Code is required"));
    } else if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        errors.push(FieldError::new(PromoField::Code, "Letters and numbers only"));
    } else if code.chars().count() > PROMO_CODE_MAX_LEN {
        errors.push(FieldError::new(PromoField::Code, "At most 20 characters"));
    }

    let mut discount_percentage = None;
    let mut discount_in_cents = None;
    let value = draft.value.trim();
    if value.is_empty() {
        errors.push(FieldError::new(PromoField::Value, "Discount is required"));
    } else {
        match value.parse::<f64>() {
            Ok(v) if v.is_finite() => match draft.kind {
                DiscountKind::Percentage => {
                    if !(PROMO_PERCENT_MIN..=PROMO_PERCENT_MAX).contains(&v) {
                        errors.push(FieldError::new(PromoField::Value, "Percentage must be between 1 and 100"));
                    } else {
                        discount_percentage = Some(v);
                    }
                }
                DiscountKind::Flat => {
                    if !(PROMO_FLAT_MIN_DOLLARS..=PROMO_FLAT_MAX_DOLLARS).contains(&v) {
                        errors.push(FieldError::new(PromoField::Value, "Amount must be between $1 and $10000"));
                    } else {
                        discount_in_cents = Some((v * CENTS_PER_DOLLAR).round() as i64);
                    }
                }
            },
            _ => errors.push(FieldError::new(PromoField::Value, "Discount must be a number")),
        }
    }

    let mut expires_on = None;
    let expires = draft.expires.trim();
    if !expires.is_empty() {
        match datetime::parse_date(expires) {
            Err(_) => errors.push(FieldError::new(PromoField::Expires, "Use the YYYY-MM-DD format")),
            Ok(date) if datetime::is_strictly_past(date, today) => {
                errors.push(FieldError::new(PromoField::Expires, "Expiration cannot be in the past"));
            }
            Ok(date) => expires_on = Some(date),
        }
    }

    match draft.scope {
        PromoScope::Groups if draft.group_ids.is_empty() => {
            errors.push(FieldError::new(PromoField::Scope, "Select at least one ticket group"));
        }
        PromoScope::Tiers if draft.tier_ids.is_empty() => {
            errors.push(FieldError::new(PromoField::Scope, "Select at least one ticket tier"));
        }
        _ => {}
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    // Only the id list the scope actually uses is stored.
    let (group_ids, tier_ids) = match draft.scope {
        PromoScope::Groups => (draft.group_ids.clone(), Vec::new()),
        PromoScope::Tiers => (Vec::new(), draft.tier_ids.clone()),
        PromoScope::All | PromoScope::Disabled => (Vec::new(), Vec::new()),
    };

    Ok(ValidPromo {
        code: code.to_uppercase(),
        discount_percentage,
        discount_in_cents,
        expires_on,
        scope: draft.scope,
        group_ids,
        tier_ids,
    })
}

/// Errors attached to one field, in insertion order.
pub fn errors_for(errors: &[FieldError], field: PromoField) -> Vec<&FieldError> {
    errors.iter().filter(|e| e.field == field).collect()
}
