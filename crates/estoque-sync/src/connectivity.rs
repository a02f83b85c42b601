//! # Connectivity
//!
//! The online/offline flag. Only the session flips it; nothing here probes
//! the network.

use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// Whether the device can currently reach the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    #[default]
    Online,
    Offline,
}

impl Connectivity {
    pub fn is_online(&self) -> bool {
        matches!(self, Connectivity::Online)
    }

    pub fn is_offline(&self) -> bool {
        !self.is_online()
    }

    pub fn from_offline_flag(offline: bool) -> Self {
        if offline {
            Connectivity::Offline
        } else {
            Connectivity::Online
        }
    }
}

impl std::fmt::Display for Connectivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Connectivity::Online => write!(f, "online"),
            Connectivity::Offline => write!(f, "offline"),
        }
    }
}

impl std::str::FromStr for Connectivity {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "online" | "connected" => Ok(Connectivity::Online),
            "offline" | "disconnected" => Ok(Connectivity::Offline),
            other => Err(SyncError::InvalidConfig(format!(
                "Unknown connectivity: '{}'. Valid options: online, offline",
                other
            ))),
        }
    }
}
