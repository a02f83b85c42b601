//! # Sync Settings
//!
//! The `[sync]` section of the application config.
//!
//! ```toml
//! [sync]
//! start_offline = false
//! simulated_latency_ms = 2000
//! auto_sync_on_reconnect = true
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::connectivity::Connectivity;
use crate::error::{SyncError, SyncResult};

/// Upper bound for the simulated latency; anything longer looks like a hang.
const MAX_LATENCY_MS: u64 = 60_000;

/// Sync behavior settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSettings {
    /// Start the session in offline mode.
    #[serde(default)]
    pub start_offline: bool,

    /// How long the simulated transport takes to "upload" a batch.
    #[serde(default = "default_latency_ms")]
    pub simulated_latency_ms: u64,

    /// Sync automatically when connectivity is restored and actions are
    /// pending.
    #[serde(default = "default_true")]
    pub auto_sync_on_reconnect: bool,
}

fn default_latency_ms() -> u64 {
    2000
}

fn default_true() -> bool {
    true
}

impl Default for SyncSettings {
    fn default() -> Self {
        SyncSettings {
            start_offline: false,
            simulated_latency_ms: default_latency_ms(),
            auto_sync_on_reconnect: default_true(),
        }
    }
}

impl SyncSettings {
    pub fn validate(&self) -> SyncResult<()> {
        if self.simulated_latency_ms > MAX_LATENCY_MS {
            return Err(SyncError::InvalidConfig(format!(
                "simulated_latency_ms must be at most {}, got {}",
                MAX_LATENCY_MS, self.simulated_latency_ms
            )));
        }
        Ok(())
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }

    pub fn initial_connectivity(&self) -> Connectivity {
        Connectivity::from_offline_flag(self.start_offline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SyncSettings::default();
        assert!(!settings.start_offline);
        assert_eq!(settings.latency(), Duration::from_secs(2));
        assert!(settings.auto_sync_on_reconnect);
        assert_eq!(settings.initial_connectivity(), Connectivity::Online);
    }

    #[test]
    fn test_validation() {
        let mut settings = SyncSettings::default();
        assert!(settings.validate().is_ok());
        settings.simulated_latency_ms = 0;
        assert!(settings.validate().is_ok());
        settings.simulated_latency_ms = MAX_LATENCY_MS + 1;
        assert!(settings.validate().is_err());
    }
}
