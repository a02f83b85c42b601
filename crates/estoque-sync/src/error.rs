//! # Sync Error Types
//!
//! Error types for queue and sync operations.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sync Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Payload             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Offline        │  │  SerializationFailed    │ │
//! │  │                 │  │  TransportFailed│  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed sync never loses queued actions: every error leaves the queue
//! exactly as it was before `sync()` was called.

use thiserror::Error;

/// Result type alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Sync error type covering all possible sync failures.
#[derive(Debug, Error)]
pub enum SyncError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid sync configuration.
    #[error("Invalid sync configuration: {0}")]
    InvalidConfig(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Sync requested while the device is offline.
    #[error("Cannot sync while offline ({pending} actions pending)")]
    Offline { pending: usize },

    /// The transport rejected or failed to deliver the batch.
    #[error("Sync transport failed: {0}")]
    TransportFailed(String),

    // =========================================================================
    // Payload Errors
    // =========================================================================
    /// Failed to serialize the pending actions.
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::SerializationFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl SyncError {
    /// Returns true if trying again later can succeed.
    ///
    /// ## Retryable Errors
    /// - Offline (reconnect first)
    /// - Transport failures
    pub fn is_retryable(&self) -> bool {
        matches!(self, SyncError::Offline { .. } | SyncError::TransportFailed(_))
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(self, SyncError::InvalidConfig(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(SyncError::Offline { pending: 2 }.is_retryable());
        assert!(SyncError::TransportFailed("timeout".into()).is_retryable());

        assert!(!SyncError::InvalidConfig("bad".into()).is_retryable());
        assert!(!SyncError::SerializationFailed("bad".into()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = SyncError::Offline { pending: 3 };
        assert_eq!(err.to_string(), "Cannot sync while offline (3 actions pending)");
        assert!(SyncError::InvalidConfig("x".into()).is_config_error());
    }
}
