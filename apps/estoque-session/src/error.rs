//! # API Error Type
//!
//! Unified error type for session commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Estoque                                │
//! │                                                                         │
//! │  Frontend                    Rust Session                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  createList('Corredor 4')                                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Domain Error? ─── CoreError::EmptySelection ──────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Sync Error? ───── SyncError::Offline ─────────── ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "VALIDATION_ERROR",                                          │
//! │    "message": "No products selected for the restock list" }             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A command that returns an error has left the session exactly as it found
//! it; the frontend only needs to show the message.

use estoque_core::CoreError;
use estoque_sync::SyncError;
use serde::Serialize;

use crate::config::ConfigError;

/// API error returned from session commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 9"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or restock list not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Not enough stock for the requested quantity
    InsufficientStock,

    /// Operation not allowed in the current state (e.g. list already closed)
    BusinessLogic,

    /// Sync refused or failed; the queue is intact
    SyncError,

    /// Camera permission denied or scan failed
    ScannerError,

    /// Configuration could not be loaded or saved
    ConfigError,

    /// Internal error
    Internal,
}

/// Result alias for command functions.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a scanner error.
    pub fn scanner(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ScannerError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::RestockListNotFound(id) => ApiError::not_found("Restock list", &id),
            CoreError::BatchNotFound(id) => ApiError::not_found("Batch", &id),
            CoreError::DuplicateProduct(id) => {
                ApiError::validation(format!("Product '{}' already exists", id))
            }
            err @ CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            err @ CoreError::InvalidListStatus { .. } => {
                ApiError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            err @ (CoreError::NegativeStock { .. } | CoreError::EmptySelection) => {
                ApiError::validation(err.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts sync errors to API errors.
impl From<SyncError> for ApiError {
    fn from(err: SyncError) -> Self {
        if err.is_config_error() {
            return ApiError::new(ErrorCode::ConfigError, err.to_string());
        }
        if let SyncError::SerializationFailed(ref e) = err {
            tracing::error!("Pending action serialization failed: {}", e);
            return ApiError::internal("Failed to prepare pending actions");
        }
        ApiError::new(ErrorCode::SyncError, err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON serialization failed: {}", err);
        ApiError::internal("Failed to serialize output")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
