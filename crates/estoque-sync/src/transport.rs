//! # Sync Transport
//!
//! The seam between the queue and whatever receives the actions.
//!
//! There is no backend yet: [`SimulatedTransport`] waits for the configured
//! latency and reports success, so the UI can exercise the full
//! syncing → synced cycle.

use std::future::Future;
use std::time::Duration;

use estoque_core::PendingAction;
use tracing::debug;

use crate::error::SyncResult;

/// Delivers a batch of pending actions. All-or-nothing: an `Err` means none
/// of the batch was accepted.
pub trait SyncTransport: Send + Sync {
    fn push(&self, actions: &[PendingAction]) -> impl Future<Output = SyncResult<()>> + Send;
}

/// Transport that sleeps and then succeeds.
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    latency: Duration,
}

impl SimulatedTransport {
    pub fn new(latency: Duration) -> Self {
        SimulatedTransport { latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000))
    }
}

impl SyncTransport for SimulatedTransport {
    async fn push(&self, actions: &[PendingAction]) -> SyncResult<()> {
        debug!(count = actions.len(), latency_ms = self.latency.as_millis() as u64, "Simulating sync upload");
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_simulated_transport_waits_latency() {
        let transport = SimulatedTransport::new(Duration::from_millis(2000));
        let start = tokio::time::Instant::now();
        transport.push(&[]).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }
}
