//! Input validation helpers
//!
//! Text limits for the free-form fields an order carries. SQLite TEXT has
//! no built-in length enforcement.

use crate::orders::OrderError;

/// Notes: customer notes, item notes, transition notes
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: actor names, table / sector codes
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Maximum quantity per line item
pub const MAX_QUANTITY: i64 = 9999;

/// Maximum line items per order
pub const MAX_ITEMS_PER_ORDER: usize = 200;

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), OrderError> {
    if value.trim().is_empty() {
        return Err(OrderError::Validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > max_len {
        return Err(OrderError::Validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.chars().count()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: Option<&str>,
    field: &str,
    max_len: usize,
) -> Result<(), OrderError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(OrderError::Validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        )));
    }
    Ok(())
}

/// Validate a line item quantity (1..=MAX_QUANTITY)
pub fn validate_quantity(quantity: i64, field: &str) -> Result<(), OrderError> {
    if quantity <= 0 {
        return Err(OrderError::Validation(format!(
            "{field} must be positive, got {quantity}"
        )));
    }
    if quantity > MAX_QUANTITY {
        return Err(OrderError::Validation(format!(
            "{field} exceeds maximum allowed ({MAX_QUANTITY}), got {quantity}"
        )));
    }
    Ok(())
}

/// Trim an optional note, dropping it when blank.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_text() {
        assert!(validate_required_text("T-12", "table_code", MAX_SHORT_TEXT_LEN).is_ok());
        assert!(validate_required_text("   ", "table_code", MAX_SHORT_TEXT_LEN).is_err());
        let long = "x".repeat(MAX_SHORT_TEXT_LEN + 1);
        assert!(validate_required_text(&long, "table_code", MAX_SHORT_TEXT_LEN).is_err());
    }

    #[test]
    fn test_validate_optional_text_counts_chars() {
        // 500 multi-byte chars are still within the limit
        let notes = "é".repeat(MAX_NOTE_LEN);
        assert!(validate_optional_text(Some(&notes), "notes", MAX_NOTE_LEN).is_ok());
        let notes = "é".repeat(MAX_NOTE_LEN + 1);
        assert!(validate_optional_text(Some(&notes), "notes", MAX_NOTE_LEN).is_err());
        assert!(validate_optional_text(None, "notes", MAX_NOTE_LEN).is_ok());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1, "quantity").is_ok());
        assert!(validate_quantity(MAX_QUANTITY, "quantity").is_ok());
        assert!(matches!(
            validate_quantity(0, "quantity"),
            Err(OrderError::Validation(_))
        ));
        assert!(validate_quantity(-3, "quantity").is_err());
        assert!(validate_quantity(MAX_QUANTITY + 1, "quantity").is_err());
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional(Some("  no onions ".into())), Some("no onions".into()));
        assert_eq!(normalize_optional(Some("   ".into())), None);
        assert_eq!(normalize_optional(None), None);
    }
}
