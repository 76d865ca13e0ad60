//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so every record type enforces the same
//! invariants.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine};

/// Parse a UUID from storage and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::InvalidId(format!("invalid {label} id")))
}

/// Largest amount a record may hold: 99,999,999.99.
pub const MAX_AMOUNT: Money = Money::new(9_999_999_999);

/// Reject amounts that are zero, negative or above [`MAX_AMOUNT`].
pub(crate) fn ensure_positive(amount: Money, label: &str) -> ResultEngine<()> {
    if !amount.is_positive() {
        return Err(EngineError::InvalidAmount(format!(
            "the {label} must be greater than zero"
        )));
    }
    ensure_within_limit(amount, label)
}

/// Reject amounts above [`MAX_AMOUNT`].
pub(crate) fn ensure_within_limit(amount: Money, label: &str) -> ResultEngine<()> {
    if amount > MAX_AMOUNT {
        return Err(EngineError::InvalidAmount(format!(
            "the {label} must not exceed {MAX_AMOUNT}"
        )));
    }
    Ok(())
}

/// Reject windows whose start falls after their end.
pub(crate) fn ensure_date_order(start: NaiveDate, end: NaiveDate) -> ResultEngine<()> {
    if start > end {
        return Err(EngineError::InvalidDateRange(
            "start date must be before end date".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn normalize_required_text(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(format!("{label} must not be empty")));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_check_rejects_zero() {
        assert!(ensure_positive(Money::new(1), "amount").is_ok());
        assert_eq!(
            ensure_positive(Money::ZERO, "amount"),
            Err(EngineError::InvalidAmount(
                "the amount must be greater than zero".to_string()
            ))
        );
    }

    #[test]
    fn amounts_above_the_limit_are_rejected() {
        assert!(ensure_positive(MAX_AMOUNT, "amount").is_ok());
        assert_eq!(
            ensure_positive(Money::new(10_000_000_000), "amount"),
            Err(EngineError::InvalidAmount(
                "the amount must not exceed 99999999.99".to_string()
            ))
        );
        assert!(ensure_within_limit(Money::new(i64::MAX), "threshold").is_err());
        assert!(ensure_within_limit(Money::new(-500), "threshold").is_ok());
    }

    #[test]
    fn optional_text_drops_blank() {
        assert_eq!(normalize_optional_text(Some("  ")), None);
        assert_eq!(normalize_optional_text(Some(" x ")), Some("x".to_string()));
        assert_eq!(normalize_optional_text(None), None);
    }
}
