//! # Error Types
//!
//! Domain-specific error types for estoque-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  estoque-core errors (this file)                                       │
//! │  ├── CoreError        - Domain rule violations                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  estoque-sync errors (separate crate)                                  │
//! │  └── SyncError        - Queue / simulated sync failures                │
//! │                                                                         │
//! │  estoque-session errors (app)                                          │
//! │  └── ApiError         - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Frontend toast         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error here is user-recoverable: the operation that produced it left
//! the catalog and restock book exactly as they were.

use chrono::NaiveDate;
use thiserror::Error;

use crate::types::RestockStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A product with the same id is already in the catalog.
    #[error("Product already exists: {0}")]
    DuplicateProduct(String),

    /// Not enough units on hand for the requested quantity.
    ///
    /// ## When This Occurs
    /// - Selecting a product whose stock is zero
    /// - Stock dropped (manual edit) between selection and list creation
    #[error("Insufficient stock for {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: String,
        available: i64,
        requested: i64,
    },

    /// A stock change would leave a product below zero.
    ///
    /// Stock is never clamped silently; the change is rejected and the
    /// stored value stays as it was.
    #[error("Stock for {product_id} cannot become negative (requested {requested})")]
    NegativeStock { product_id: String, requested: i64 },

    /// A restock list was saved with no products selected.
    #[error("No products selected for the restock list")]
    EmptySelection,

    /// Batch id is unknown, or belongs to another product.
    #[error("Batch not found: {0}")]
    BatchNotFound(String),

    /// Restock list id is unknown.
    #[error("Restock list not found: {0}")]
    RestockListNotFound(String),

    /// Restock list is already terminal.
    ///
    /// ## When This Occurs
    /// - Confirming a list twice
    /// - Cancelling a list that was already completed
    #[error("Restock list {list_id} is {current_status}, cannot perform operation")]
    InvalidListStatus {
        list_id: String,
        current_status: RestockStatus,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns true for input problems the user fixes by editing the form.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CoreError::EmptySelection
                | CoreError::InsufficientStock { .. }
                | CoreError::NegativeStock { .. }
                | CoreError::Validation(_)
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Report period runs backwards.
    #[error("Start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
