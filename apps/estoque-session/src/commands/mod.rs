//! # Commands Module
//!
//! Every operation the mobile shell can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── product.rs   ◄─── Catalog reads, stock edits, product entry, scanner
//! ├── restock.rs   ◄─── Selection and restock list lifecycle
//! ├── batch.rs     ◄─── Batch list with expiry status
//! ├── movement.rs  ◄─── Movement history, losses
//! ├── report.rs    ◄─── Reports and dashboard counters
//! └── sync.rs      ◄─── Connectivity and offline queue
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Shell                                                                  │
//! │  ─────                                                                  │
//! │  restock::create_list(&mut session, "Reposição Semanal")               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │  1. Delegate to estoque-core (validation + mutation)           │    │
//! │  │  2. Log movements for the stock change                         │    │
//! │  │  3. Queue a SyncAction if offline                              │    │
//! │  │  4. Emit a notice                                              │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Result<RestockList, ApiError>  (serializes to JSON for the frontend)  │
//! │                                                                         │
//! │  On error nothing was changed; the error is also shown as a            │
//! │  destructive notice.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Session Access
//! Read-only commands take `&Session`, mutating ones `&mut Session`:
//! ```rust,ignore
//! // Read only
//! fn low_stock_products(session: &Session<T>) -> Vec<Product>
//!
//! // Mutates stock and the restock book
//! fn cancel_list(session: &mut Session<T>, list_id: &str) -> ApiResult<RestockList>
//!
//! // Suspends on the transport
//! async fn sync_now(session: &mut Session<T>) -> ApiResult<SyncReport>
//! ```

pub mod batch;
pub mod movement;
pub mod product;
pub mod report;
pub mod restock;
pub mod sync;
