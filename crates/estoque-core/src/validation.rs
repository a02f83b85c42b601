//! # Validation Module
//!
//! Input validation for product entry, stock edits and restock lists.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend form                                                │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Session command                                              │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog / RestockBook                                        │
//! │  └── Stock invariants (never negative, quantity ≤ stock)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Barcodes are deliberately NOT format-checked: whatever the scanner or the
//! user produced is stored as-is.

use crate::error::ValidationError;
use crate::{MAX_ITEM_QUANTITY, MAX_RESTOCK_ITEMS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_LIST_NAME_LEN: usize = 100;
const MAX_BARCODE_LEN: usize = 64;
const MAX_QUERY_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use estoque_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Feijão Preto").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a restock list name and returns the name to store.
///
/// A blank name is not an error: the list gets `default_name` instead.
pub fn validate_list_name(name: &str, default_name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Ok(default_name.to_string());
    }

    if name.chars().count() > MAX_LIST_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "list name".to_string(),
            max: MAX_LIST_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates a barcode and returns it trimmed.
///
/// Only the length is bounded; content is taken verbatim.
pub fn validate_barcode(barcode: &str) -> ValidationResult<String> {
    let barcode = barcode.trim();

    if barcode.len() > MAX_BARCODE_LEN {
        return Err(ValidationError::TooLong {
            field: "barcode".to_string(),
            max: MAX_BARCODE_LEN,
        });
    }

    Ok(barcode.to_string())
}

/// Validates a search query.
///
/// ## Returns
/// The trimmed query string (may be empty, meaning "everything").
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a restock line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a stock level (current or minimum).
///
/// ## Rules
/// - Zero is allowed
/// - Must not exceed MAX_ITEM_QUANTITY
pub fn validate_stock_level(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    if value > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates restock list size (number of distinct products).
pub fn validate_list_size(items: usize) -> ValidationResult<()> {
    if items > MAX_RESTOCK_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "restock items".to_string(),
            min: 1,
            max: MAX_RESTOCK_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Café em Pó").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_list_name_falls_back_to_default() {
        assert_eq!(
            validate_list_name("  ", "Lista de Reposição").unwrap(),
            "Lista de Reposição"
        );
        assert_eq!(
            validate_list_name(" Corredor 4 ", "Lista de Reposição").unwrap(),
            "Corredor 4"
        );
        assert!(validate_list_name(&"x".repeat(101), "Lista").is_err());
    }

    #[test]
    fn test_validate_barcode_takes_anything_short() {
        assert_eq!(validate_barcode(" 789123 ").unwrap(), "789123");
        // not a valid EAN, still accepted
        assert!(validate_barcode("ABC-not-an-ean").is_ok());
        assert!(validate_barcode("").is_ok());
        assert!(validate_barcode(&"9".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_stock_level() {
        assert!(validate_stock_level("currentStock", 0).is_ok());
        assert!(validate_stock_level("minStock", 20).is_ok());
        assert!(validate_stock_level("currentStock", -1).is_err());
    }

    #[test]
    fn test_validate_list_size() {
        assert!(validate_list_size(MAX_RESTOCK_ITEMS).is_ok());
        assert!(validate_list_size(MAX_RESTOCK_ITEMS + 1).is_err());
    }
}
