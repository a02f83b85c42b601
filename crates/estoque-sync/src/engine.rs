//! # Sync Engine
//!
//! Owns the offline queue and the connectivity flag, and runs syncs through
//! a [`SyncTransport`].
//!
//! ## Sync Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           sync()                                        │
//! │                                                                         │
//! │   queue empty? ──yes──► Ok(synced: 0)          (no delay, no events)    │
//! │        │ no                                                             │
//! │   offline? ─────yes──► Err(Offline)            (queue untouched)        │
//! │        │ no                                                             │
//! │   emit status(syncing)                                                  │
//! │   transport.push(snapshot).await                                        │
//! │        ├── Ok  ──► acknowledge snapshot, emit progress(0, n), status    │
//! │        └── Err ──► emit error, status         (queue untouched)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `sync` borrows the engine mutably for the whole upload, so two syncs can
//! never overlap and nothing can be enqueued mid-flight.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use estoque_core::{PendingAction, SyncAction};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::SyncSettings;
use crate::connectivity::Connectivity;
use crate::error::{SyncError, SyncResult};
use crate::queue::OfflineQueue;
use crate::transport::{SimulatedTransport, SyncTransport};

// =============================================================================
// Status & Events
// =============================================================================

/// Snapshot of the sync state for the status bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    pub connectivity: Connectivity,
    pub is_syncing: bool,
    /// Actions waiting for the next sync.
    pub pending_count: usize,
    pub last_synced_at: Option<DateTime<Utc>>,
}

/// Receives sync events (toasts, status bar).
pub trait SyncEventEmitter: Send + Sync {
    /// A sync started or finished.
    fn emit_status(&self, status: &SyncStatus);

    /// A sync completed: `pending` remain, `synced` were delivered.
    fn emit_progress(&self, pending: usize, synced: usize);

    /// A sync failed.
    fn emit_error(&self, message: &str, retryable: bool);

    /// Connectivity changed.
    fn emit_connectivity(&self, connectivity: Connectivity);
}

/// No-op event emitter for testing.
pub struct NoOpEmitter;

impl SyncEventEmitter for NoOpEmitter {
    fn emit_status(&self, _status: &SyncStatus) {}
    fn emit_progress(&self, _pending: usize, _synced: usize) {}
    fn emit_error(&self, _message: &str, _retryable: bool) {}
    fn emit_connectivity(&self, _connectivity: Connectivity) {}
}

/// Outcome of a successful sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub synced: usize,
    pub remaining: usize,
}

// =============================================================================
// Sync Engine
// =============================================================================

pub struct SyncEngine<T: SyncTransport = SimulatedTransport> {
    queue: OfflineQueue,
    connectivity: Connectivity,
    transport: T,
    emitter: Arc<dyn SyncEventEmitter>,
    auto_sync_on_reconnect: bool,
    is_syncing: bool,
    last_synced_at: Option<DateTime<Utc>>,
}

impl SyncEngine<SimulatedTransport> {
    /// Creates an engine with the simulated transport.
    pub fn new(settings: &SyncSettings) -> Self {
        Self::with_transport(settings, SimulatedTransport::new(settings.latency()))
    }
}

impl<T: SyncTransport> SyncEngine<T> {
    pub fn with_transport(settings: &SyncSettings, transport: T) -> Self {
        SyncEngine {
            queue: OfflineQueue::new(),
            connectivity: settings.initial_connectivity(),
            transport,
            emitter: Arc::new(NoOpEmitter),
            auto_sync_on_reconnect: settings.auto_sync_on_reconnect,
            is_syncing: false,
            last_synced_at: None,
        }
    }

    /// Replaces the event emitter.
    pub fn with_emitter(mut self, emitter: Arc<dyn SyncEventEmitter>) -> Self {
        self.emitter = emitter;
        self
    }

    // =========================================================================
    // Queue
    // =========================================================================

    /// Queues `action` if the device is offline.
    ///
    /// ## Returns
    /// The queued entry, or `None` when online (the action needs no sync).
    pub fn record(&mut self, action: SyncAction) -> Option<&PendingAction> {
        if self.connectivity.is_online() {
            return None;
        }
        let entry = self.queue.enqueue(action);
        debug!(kind = entry.action.kind(), id = %entry.id, "Queued offline action");
        Some(entry)
    }

    pub fn queue(&self) -> &OfflineQueue {
        &self.queue
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    // =========================================================================
    // Connectivity
    // =========================================================================

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    pub fn is_offline(&self) -> bool {
        self.connectivity.is_offline()
    }

    /// Switches to offline mode. Returns false if already offline.
    pub fn go_offline(&mut self) -> bool {
        self.set_connectivity(Connectivity::Offline)
    }

    /// Switches to online mode. Returns false if already online.
    ///
    /// Does not sync by itself; see [`should_auto_sync`](Self::should_auto_sync).
    pub fn go_online(&mut self) -> bool {
        self.set_connectivity(Connectivity::Online)
    }

    /// True when a reconnect should be followed by an automatic sync.
    pub fn should_auto_sync(&self) -> bool {
        self.auto_sync_on_reconnect && self.connectivity.is_online() && !self.queue.is_empty()
    }

    fn set_connectivity(&mut self, connectivity: Connectivity) -> bool {
        if self.connectivity == connectivity {
            return false;
        }
        info!(from = %self.connectivity, to = %connectivity, pending = self.queue.len(), "Connectivity changed");
        self.connectivity = connectivity;
        self.emitter.emit_connectivity(connectivity);
        true
    }

    // =========================================================================
    // Sync
    // =========================================================================

    /// Pushes every pending action through the transport.
    ///
    /// ## Errors
    /// - `Offline` when the device is offline and actions are pending
    /// - whatever the transport returns
    ///
    /// The queue is untouched on every error path.
    pub async fn sync(&mut self) -> SyncResult<SyncReport> {
        if self.queue.is_empty() {
            debug!("Nothing to sync");
            return Ok(SyncReport {
                synced: 0,
                remaining: 0,
            });
        }

        if self.connectivity.is_offline() {
            let err = SyncError::Offline {
                pending: self.queue.len(),
            };
            warn!(error = %err, "Sync refused");
            self.emitter.emit_error(&err.to_string(), err.is_retryable());
            return Err(err);
        }

        let snapshot = self.queue.snapshot();
        info!(count = snapshot.len(), "Starting sync");

        self.is_syncing = true;
        self.emitter.emit_status(&self.status());

        let result = self.transport.push(&snapshot).await;
        self.is_syncing = false;

        match result {
            Ok(()) => {
                let synced = self.queue.acknowledge(&snapshot);
                self.last_synced_at = Some(Utc::now());
                info!(synced, remaining = self.queue.len(), "Sync complete");
                self.emitter.emit_progress(self.queue.len(), synced);
                self.emitter.emit_status(&self.status());
                Ok(SyncReport {
                    synced,
                    remaining: self.queue.len(),
                })
            }
            Err(err) => {
                warn!(error = %err, pending = self.queue.len(), "Sync failed");
                self.emitter.emit_error(&err.to_string(), err.is_retryable());
                self.emitter.emit_status(&self.status());
                Err(err)
            }
        }
    }

    pub fn status(&self) -> SyncStatus {
        SyncStatus {
            connectivity: self.connectivity,
            is_syncing: self.is_syncing,
            pending_count: self.queue.len(),
            last_synced_at: self.last_synced_at,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
