//! # estoque-core: Pure Inventory Logic for Estoque
//!
//! This crate holds every inventory rule as plain data structures and
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Estoque Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Mobile Frontend                              │   │
//! │  │   Produtos ──► Lotes ──► Reposição ──► Movimentações ──► ...   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 estoque-session (app layer)                     │   │
//! │  └──────────────┬──────────────────────────────┬───────────────────┘   │
//! │                 │                              │                        │
//! │  ┌──────────────▼──────────────┐  ┌────────────▼────────────────────┐  │
//! │  │ ★ estoque-core (THIS) ★     │  │ estoque-sync                    │  │
//! │  │  catalog  restock  batch    │◄─│  OfflineQueue, SyncEngine       │  │
//! │  │  movement report validation │  │                                 │  │
//! │  │  NO I/O • PURE FUNCTIONS    │  │                                 │  │
//! │  └─────────────────────────────┘  └─────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, RestockList, Batch, Movement, SyncAction)
//! - [`catalog`] - In-memory product store, the single stock mutator
//! - [`restock`] - Selection map and the restock list state machine
//! - [`batch`] - Expiry status derivation and batch filters
//! - [`movement`] - Movement history log and filters
//! - [`report`] - Dashboard stats and report rows
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use estoque_core::catalog::{NewProduct, ProductCatalog};
//! use estoque_core::restock::{RestockBook, RestockSelection};
//!
//! let mut catalog = ProductCatalog::new();
//! let id = catalog
//!     .add_product(NewProduct {
//!         name: "Arroz Branco".into(),
//!         current_stock: 10,
//!         min_stock: 15,
//!         ..NewProduct::default()
//!     })
//!     .unwrap()
//!     .id
//!     .clone();
//!
//! let mut selection = RestockSelection::new();
//! selection.select(&catalog, &id, true, 3).unwrap();
//!
//! let mut book = RestockBook::new();
//! let list = book.create_list(&mut catalog, "Corredor 4", &selection).unwrap();
//!
//! assert_eq!(list.items[0].quantity, 3);
//! assert_eq!(catalog.get(&id).unwrap().current_stock, 7);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod batch;
pub mod catalog;
pub mod error;
pub mod movement;
pub mod report;
pub mod restock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::ProductCatalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Name given to a restock list when the user leaves the name blank.
pub const DEFAULT_LIST_NAME: &str = "Lista de Reposição";

/// Units added on top of `min_stock` when a product is marked as restocked
/// and the caller gives no explicit quantity.
pub const DEFAULT_REPLENISHMENT: i64 = 5;

/// Batches expiring within this many days are flagged as expiring.
pub const EXPIRY_WARNING_DAYS: i64 = 30;

/// Maximum number of products in a single restock list.
pub const MAX_RESTOCK_ITEMS: usize = 100;

/// Maximum quantity accepted for a single line or stock level.
///
/// Guards against typing 10000 instead of 100 on a phone keypad.
pub const MAX_ITEM_QUANTITY: i64 = 9_999;
