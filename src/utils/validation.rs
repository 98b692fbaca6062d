//! Validation utilities

use bigdecimal::BigDecimal;

use crate::traits::*;
use crate::types::*;

/// Validate that an amount is not negative
pub fn validate_non_negative_amount(amount: &BigDecimal, field: &str) -> ReconResult<()> {
    if *amount < BigDecimal::from(0) {
        Err(ReconError::Validation(format!(
            "{field} amount cannot be negative: {amount}"
        )))
    } else {
        Ok(())
    }
}

/// Validate that an employee key is well formed
pub fn validate_employee_key(key: &str) -> ReconResult<()> {
    if key.trim().is_empty() {
        return Err(ReconError::Validation(
            "Employee key cannot be empty".to_string(),
        ));
    }

    if key.len() > 50 {
        return Err(ReconError::Validation(
            "Employee key cannot exceed 50 characters".to_string(),
        ));
    }

    // Check for valid characters (alphanumeric, dashes, underscores)
    if !key
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ReconError::Validation(
            "Employee key can only contain alphanumeric characters, dashes, and underscores"
                .to_string(),
        ));
    }

    Ok(())
}

/// Enhanced event validator with detailed entry rules
///
/// On top of the default contract checks, the key must follow the directory
/// format and an event must carry at least one nonzero amount. The engine
/// tolerates all-zero events, but data entry has no reason to create them.
pub struct EnhancedEventValidator;

impl EventValidator for EnhancedEventValidator {
    fn validate_event(&self, event: &Event) -> ReconResult<()> {
        DefaultEventValidator.validate_event(event)?;

        validate_employee_key(&event.employee_key)?;
        validate_non_negative_amount(&event.collection, "Collection")?;
        validate_non_negative_amount(&event.deposit, "Deposit")?;

        if event.is_empty() {
            return Err(ReconError::Validation(
                "Event must carry a collection or a deposit amount".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(key: &str, collection: i64, deposit: i64) -> Event {
        Event::new(
            key,
            NaiveDate::from_ymd_opt(2025, 3, 26).unwrap(),
            BigDecimal::from(collection),
            BigDecimal::from(deposit),
        )
    }

    #[test]
    fn test_validate_employee_key() {
        assert!(validate_employee_key("EMP001").is_ok());
        assert!(validate_employee_key("field-agent_7").is_ok());
        assert!(validate_employee_key("").is_err());
        assert!(validate_employee_key("has spaces").is_err());
        assert!(validate_employee_key(&"x".repeat(51)).is_err());
    }

    #[test]
    fn test_enhanced_validator_rejects_all_zero_event() {
        let result = EnhancedEventValidator.validate_event(&event("EMP001", 0, 0));
        assert!(matches!(result, Err(ReconError::Validation(_))));
    }

    #[test]
    fn test_enhanced_validator_rejects_bad_key() {
        let result = EnhancedEventValidator.validate_event(&event("EMP 001", 100, 0));
        assert!(matches!(result, Err(ReconError::Validation(_))));
    }

    #[test]
    fn test_enhanced_validator_accepts_normal_event() {
        assert!(EnhancedEventValidator
            .validate_event(&event("EMP001", 10000, 0))
            .is_ok());
    }
}
