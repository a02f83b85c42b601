//! # estoque-sync: Offline Queue and Sync Engine for Estoque
//!
//! Records restock actions performed while offline and pushes them in one
//! batch when the device reconnects.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sync Engine Architecture                         │
//! │                                                                         │
//! │   session command (offline)                                             │
//! │          │ record(SyncAction)                                           │
//! │          ▼                                                              │
//! │  ┌────────────────┐   sync()   ┌────────────────┐                      │
//! │  │  OfflineQueue  │ ─────────► │ SyncTransport  │                      │
//! │  │ PendingAction* │  snapshot  │ (simulated:    │                      │
//! │  └────────────────┘ ◄───────── │  sleep, Ok)    │                      │
//! │          ▲          ack / keep └────────────────┘                      │
//! │          │                                                              │
//! │   Connectivity: Online ◄──► Offline                                     │
//! │                                                                         │
//! │  STATUS EVENTS (to the session via SyncEventEmitter):                  │
//! │  • status       - sync started / finished                              │
//! │  • progress     - pending vs synced counts                             │
//! │  • error        - sync failures                                        │
//! │  • connectivity - online / offline transitions                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`engine`] - `SyncEngine` orchestrator and status events
//! - [`queue`] - The pending-action queue
//! - [`connectivity`] - Online / offline flag
//! - [`transport`] - Sync seam and the simulated transport
//! - [`config`] - Sync settings
//! - [`error`] - Sync error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use estoque_sync::{SyncEngine, SyncSettings};
//!
//! let mut engine = SyncEngine::new(&SyncSettings::default());
//! engine.go_offline();
//! engine.record(action);
//! engine.go_online();
//! let report = engine.sync().await?;
//! println!("synced {}", report.synced);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod connectivity;
pub mod engine;
pub mod error;
pub mod queue;
pub mod transport;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::SyncSettings;
pub use connectivity::Connectivity;
pub use engine::{NoOpEmitter, SyncEngine, SyncEventEmitter, SyncReport, SyncStatus};
pub use error::{SyncError, SyncResult};
pub use queue::OfflineQueue;
pub use transport::{SimulatedTransport, SyncTransport};
