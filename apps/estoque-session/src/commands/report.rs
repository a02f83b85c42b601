//! # Report Commands
//!
//! Dashboard counters and the reports screen.
//!
//! ## Reports Screen
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Tipo       ( Diário | Semanal | Mensal )                               │
//! │  Categoria  ( Movimentações | Produtos a Vencer |                       │
//! │               Estoque Baixo | Mais Repostos )                           │
//! │  Período    [ início ] – [ fim ]   (optional, else the type's window)   │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  generate_report(&mut session, &options) → Report { title, rows }      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use estoque_core::report::{build_report, InventoryStats, Report, ReportOptions, ReportSources};
use estoque_sync::SyncTransport;
use tracing::{debug, info};

use crate::error::ApiResult;
use crate::state::Session;

/// Builds a report for today.
///
/// ## Errors
/// - `ValidationError` when the start date is after the end date
pub fn generate_report<T: SyncTransport>(
    session: &mut Session<T>,
    options: &ReportOptions,
) -> ApiResult<Report> {
    debug!(
        report_type = ?options.report_type,
        category = ?options.category,
        "generate_report command"
    );

    let today = session.today();
    let warning_days = session.config().restock.expiry_warning_days;
    session.inventory.refresh_batches(today, warning_days);

    let sources = ReportSources {
        catalog: &session.inventory.catalog,
        batches: &session.inventory.batches,
        movements: &session.inventory.movements,
        restock_history: session.restock.book.history(),
        warning_days,
    };
    let report = match build_report(options, &sources, today) {
        Ok(report) => report,
        Err(err) => return Err(session.fail("Erro ao gerar relatório", err)),
    };

    info!(title = %report.title, rows = report.rows.len(), "Report generated");
    Ok(report)
}

/// Counters for the dashboard cards.
pub fn dashboard_stats<T: SyncTransport>(session: &mut Session<T>) -> InventoryStats {
    debug!("dashboard_stats command");

    let today = session.today();
    let warning_days = session.config().restock.expiry_warning_days;
    session.inventory.refresh_batches(today, warning_days);

    InventoryStats::compute(&session.inventory.catalog, &session.inventory.batches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::error::ErrorCode;
    use crate::notify::RecordingNotifier;
    use crate::seed::seeded_session;
    use chrono::{Duration, Utc};
    use estoque_core::report::{ReportCategory, ReportRows, ReportType};
    use std::sync::Arc;

    fn session() -> Session {
        seeded_session(AppConfig::default(), Arc::new(RecordingNotifier::new()))
    }

    #[test]
    fn test_dashboard_stats() {
        let mut session = session();
        let stats = dashboard_stats(&mut session);

        assert_eq!(stats.total_products, 5);
        assert_eq!(stats.low_stock_products, 3);
        assert_eq!(stats.expired_batches, 1);
        assert_eq!(stats.expiring_batches, 2);
        assert_eq!(stats.total_stock, 78);
    }

    #[test]
    fn test_low_stock_report() {
        let mut session = session();
        let options = ReportOptions::new(ReportType::Weekly, ReportCategory::LowStock);
        let report = generate_report(&mut session, &options).unwrap();

        match report.rows {
            ReportRows::LowStock(rows) => {
                let ids: Vec<&str> = rows.iter().map(|r| r.product_id.as_str()).collect();
                assert_eq!(ids, vec!["3", "4", "1"]);
            }
            other => panic!("unexpected rows: {:?}", other),
        }
    }

    #[test]
    fn test_top_restocked_counts_completed_lists() {
        let mut session = session();
        let mut options = ReportOptions::new(ReportType::Monthly, ReportCategory::TopRestocked);
        options.start_date = chrono::NaiveDate::from_ymd_opt(2025, 3, 1);
        options.end_date = chrono::NaiveDate::from_ymd_opt(2025, 4, 30);

        let report = generate_report(&mut session, &options).unwrap();
        match report.rows {
            ReportRows::TopRestocked(rows) => {
                let totals: Vec<(&str, i64)> = rows
                    .iter()
                    .map(|r| (r.product_id.as_str(), r.total_quantity))
                    .collect();
                assert_eq!(totals, vec![("2", 7), ("1", 5)]);
            }
            other => panic!("unexpected rows: {:?}", other),
        }
    }

    #[test]
    fn test_backwards_range_is_rejected() {
        let mut session = session();
        let today = Utc::now().date_naive();
        let mut options = ReportOptions::new(ReportType::Daily, ReportCategory::Movements);
        options.start_date = Some(today);
        options.end_date = Some(today - Duration::days(3));

        let err = generate_report(&mut session, &options).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
