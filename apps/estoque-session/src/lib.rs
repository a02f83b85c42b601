//! # Estoque Session Library
//!
//! Session layer of the Estoque inventory app: owns the in-memory state,
//! exposes the commands the mobile shell invokes, and turns outcomes into
//! notices.
//!
//! ## Module Organization
//! ```text
//! estoque_session/
//! ├── lib.rs          ◄─── You are here (logging setup & CLI run)
//! ├── state/
//! │   ├── mod.rs      ◄─── Session (owns everything below)
//! │   ├── inventory.rs◄─── Catalog, batches, movement log
//! │   ├── restock.rs  ◄─── Selection and restock book
//! │   └── sync.rs     ◄─── Sync events → notices
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Catalog, stock edits, scanner
//! │   ├── restock.rs  ◄─── Restock list lifecycle
//! │   ├── batch.rs    ◄─── Batch list
//! │   ├── movement.rs ◄─── Movement history, losses
//! │   ├── report.rs   ◄─── Reports, dashboard
//! │   └── sync.rs     ◄─── Connectivity, offline queue
//! ├── config.rs       ◄─── estoque.toml + ESTOQUE_* overrides
//! ├── error.rs        ◄─── API error type for commands
//! ├── notify.rs       ◄─── Notices (toasts)
//! ├── route.rs        ◄─── Screens of the app
//! ├── scanner.rs      ◄─── Barcode scanner seam
//! └── seed.rs         ◄─── Demo inventory
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod notify;
pub mod route;
pub mod scanner;
pub mod seed;
pub mod state;

use std::sync::Arc;

use estoque_core::report::{InventoryStats, Report, ReportCategory, ReportOptions, ReportType};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use error::{ApiError, ApiResult};
use notify::TracingNotifier;

/// Output of the `estoque` binary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Overview {
    store: String,
    stats: InventoryStats,
    report: Report,
}

/// Runs the `estoque` CLI.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       CLI Startup                                       │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,estoque=debug; override with RUST_LOG              │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • estoque.toml in the platform config dir, then ESTOQUE_* vars      │
/// │     • Falls back to defaults on error                                   │
/// │                                                                         │
/// │  3. Seed Session ─────────────────────────────────────────────────────► │
/// │     • Demo catalog, batches, movements, restock history                 │
/// │                                                                         │
/// │  4. Print JSON to stdout ─────────────────────────────────────────────► │
/// │     • Dashboard counters + one weekly report                            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// ## Arguments
/// * `category` - `movements`, `expiring`, `low-stock` (default) or
///   `top-restocked`
pub async fn run(category: Option<String>) -> ApiResult<()> {
    init_tracing();

    let category = parse_category(category.as_deref())?;
    let config = AppConfig::load_or_default(None);
    let store = config.store.name.clone();

    info!(store = %store, ?category, "Starting estoque");

    let mut session = seed::seeded_session(config, Arc::new(TracingNotifier));
    let stats = commands::report::dashboard_stats(&mut session);
    let options = ReportOptions::new(ReportType::Weekly, category);
    let report = commands::report::generate_report(&mut session, &options)?;

    let overview = Overview {
        store,
        stats,
        report,
    };
    println!("{}", serde_json::to_string_pretty(&overview)?);
    Ok(())
}

fn parse_category(arg: Option<&str>) -> ApiResult<ReportCategory> {
    match arg.map(str::trim) {
        None | Some("") | Some("low-stock") => Ok(ReportCategory::LowStock),
        Some("movements") => Ok(ReportCategory::Movements),
        Some("expiring") => Ok(ReportCategory::Expiring),
        Some("top-restocked") => Ok(ReportCategory::TopRestocked),
        Some(other) => Err(ApiError::validation(format!(
            "Unknown report category '{}' (expected movements, expiring, low-stock or top-restocked)",
            other
        ))),
    }
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - ERROR: Something failed that shouldn't have
/// - WARN: Something unexpected but recoverable (rejected edit, failed sync)
/// - INFO: Important events (list created, sync complete)
/// - DEBUG: Every command invocation
/// - TRACE: Very verbose debugging
///
/// ## Configuration
/// Set `RUST_LOG` environment variable:
/// - `RUST_LOG=debug` - Show all debug logs
/// - `RUST_LOG=estoque_sync=trace` - Trace the sync engine only
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,estoque=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
