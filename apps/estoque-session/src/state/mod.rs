//! # State Module
//!
//! Session state for the inventory app.
//!
//! Each concern keeps its own state type. [`Session`] bundles them so a
//! command can borrow exactly the parts it touches, e.g. the restock book
//! mutably together with the catalog.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                          Session                                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │          │                  │                  │              │         │
//! │          ▼                  ▼                  ▼              ▼         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌──────────┐    │
//! │  │ Inventory    │  │ Restock      │  │ SyncEngine   │  │ AppConfig│    │
//! │  │ State        │  │ State        │  │              │  │ Notifier │    │
//! │  │              │  │              │  │ queue        │  │          │    │
//! │  │ catalog      │  │ selection    │  │ connectivity │  │          │    │
//! │  │ batches      │  │ book         │  │ emitter ─────┼──┼─► toasts │    │
//! │  │ movements    │  │              │  │              │  │          │    │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └──────────┘    │
//! │                                                                         │
//! │  OWNERSHIP:                                                            │
//! │  • One Session per running app, owned by the shell                     │
//! │  • Mutating commands take &mut Session, so syncs never overlap         │
//! │  • Only the notifier is shared (Arc), with the sync emitter            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod inventory;
mod restock;
mod sync;

pub use inventory::{InventoryState, MANUAL_ADJUSTMENT_NOTE};
pub use restock::RestockState;
pub use sync::NotifierEmitter;

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use estoque_core::restock::RestockBook;
use estoque_sync::{SimulatedTransport, SyncEngine, SyncTransport};
use tracing::info;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::notify::{Notice, Notifier};

pub struct Session<T: SyncTransport = SimulatedTransport> {
    pub(crate) inventory: InventoryState,
    pub(crate) restock: RestockState,
    pub(crate) sync: SyncEngine<T>,
    config: AppConfig,
    notifier: Arc<dyn Notifier>,
}

impl Session<SimulatedTransport> {
    /// Empty session syncing through the simulated backend.
    pub fn new(config: AppConfig, notifier: Arc<dyn Notifier>) -> Self {
        let transport = SimulatedTransport::new(config.sync.latency());
        Session::with_transport(config, transport, notifier)
    }
}

impl<T: SyncTransport> Session<T> {
    pub fn with_transport(config: AppConfig, transport: T, notifier: Arc<dyn Notifier>) -> Self {
        let sync = sync::engine_with_notifier(&config.sync, transport, notifier.clone());
        let restock = RestockState::new(&config.restock.default_list_name);

        info!(
            store = %config.store.name,
            connectivity = %sync.connectivity(),
            "Session started"
        );

        Session {
            inventory: InventoryState::new(),
            restock,
            sync,
            config,
            notifier,
        }
    }

    /// Replaces the inventory, e.g. with seed data.
    pub fn with_inventory(mut self, inventory: InventoryState) -> Self {
        self.inventory = inventory;
        self
    }

    /// Replaces the restock book. Selection starts empty.
    pub fn with_restock_book(mut self, book: RestockBook) -> Self {
        self.restock = RestockState::with_book(book);
        self
    }

    pub fn inventory(&self) -> &InventoryState {
        &self.inventory
    }

    pub fn restock(&self) -> &RestockState {
        &self.restock
    }

    pub fn sync_engine(&self) -> &SyncEngine<T> {
        &self.sync
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub(crate) fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }

    pub(crate) fn notify(&self, notice: Notice) {
        self.notifier.notify(notice);
    }

    /// Shows `err` as a destructive notice titled `title` and hands it back.
    pub(crate) fn fail(&self, title: &str, err: impl Into<ApiError>) -> ApiError {
        let err = err.into();
        self.notifier
            .notify(Notice::destructive(title).with_description(err.message.clone()));
        err
    }
}
