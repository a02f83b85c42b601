//! # Batch Commands
//!
//! Batch list with expiry status, refreshed against today's date.

use estoque_core::batch::{filter_batches, BatchFilter};
use estoque_core::Batch;
use estoque_sync::SyncTransport;
use tracing::debug;

use crate::state::Session;

/// Batches matching `filter`, with statuses recomputed for today.
pub fn list_batches<T: SyncTransport>(session: &mut Session<T>, filter: &BatchFilter) -> Vec<Batch> {
    debug!(status = ?filter.status, search = %filter.search, "list_batches command");

    let today = session.today();
    let warning_days = session.config().restock.expiry_warning_days;
    session.inventory.refresh_batches(today, warning_days);

    filter_batches(&session.inventory.batches, &session.inventory.catalog, filter)
        .into_iter()
        .cloned()
        .collect()
}

/// Batches of one product.
pub fn product_batches<T: SyncTransport>(session: &Session<T>, product_id: &str) -> Vec<Batch> {
    debug!(product_id = %product_id, "product_batches command");
    session
        .inventory
        .batches
        .iter()
        .filter(|b| b.product_id == product_id)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::notify::RecordingNotifier;
    use crate::seed::seeded_session;
    use estoque_core::BatchStatus;
    use std::sync::Arc;

    #[test]
    fn test_filter_by_status() {
        let mut session = seeded_session(AppConfig::default(), Arc::new(RecordingNotifier::new()));

        let expired = list_batches(
            &mut session,
            &BatchFilter {
                status: Some(BatchStatus::Expired),
                ..BatchFilter::default()
            },
        );
        let ids: Vec<&str> = expired.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["5"]);

        let expiring = list_batches(
            &mut session,
            &BatchFilter {
                status: Some(BatchStatus::Expiring),
                ..BatchFilter::default()
            },
        );
        let ids: Vec<&str> = expiring.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "6"]);
    }

    #[test]
    fn test_search_by_location_and_product() {
        let mut session = seeded_session(AppConfig::default(), Arc::new(RecordingNotifier::new()));
        let filter = BatchFilter {
            search: "leite".into(),
            ..BatchFilter::default()
        };
        assert_eq!(list_batches(&mut session, &filter).len(), 2);

        let filter = BatchFilter {
            search: "d1".into(),
            ..BatchFilter::default()
        };
        assert_eq!(list_batches(&mut session, &filter).len(), 1);
        assert_eq!(product_batches(&session, "4").len(), 2);
    }
}
