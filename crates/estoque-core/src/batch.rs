//! # Batch Expiry
//!
//! Derives batch status from expiry dates and filters the batch view.
//!
//! ## Status Bands
//! ```text
//!   expiry < today                          → Expired
//!   today ≤ expiry ≤ today + warning_days   → Expiring
//!   expiry > today + warning_days           → Ok
//! ```

use chrono::NaiveDate;

use crate::catalog::ProductCatalog;
use crate::types::{Batch, BatchStatus};

/// Status of a batch expiring on `expiry`, as seen on `today`.
pub fn batch_status(expiry: NaiveDate, today: NaiveDate, warning_days: i64) -> BatchStatus {
    let remaining = (expiry - today).num_days();
    if remaining < 0 {
        BatchStatus::Expired
    } else if remaining <= warning_days {
        BatchStatus::Expiring
    } else {
        BatchStatus::Ok
    }
}

impl Batch {
    /// Days from `today` to expiry; negative once expired.
    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        (self.expiry_date - today).num_days()
    }
}

/// Recomputes the stored status of every batch.
///
/// Statuses are a snapshot of the day they were computed; call this when
/// the date rolls over.
pub fn refresh_statuses(batches: &mut [Batch], today: NaiveDate, warning_days: i64) {
    for batch in batches.iter_mut() {
        batch.status = batch_status(batch.expiry_date, today, warning_days);
    }
}

// =============================================================================
// Filtering
// =============================================================================

/// Filters for the batch list view.
#[derive(Debug, Clone, Default)]
pub struct BatchFilter {
    /// `None` shows every status.
    pub status: Option<BatchStatus>,
    /// Matches the product name or the batch location, case-insensitive.
    pub search: String,
}

impl BatchFilter {
    fn matches(&self, batch: &Batch, catalog: &ProductCatalog) -> bool {
        if let Some(status) = self.status {
            if batch.status != status {
                return false;
            }
        }

        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        let product_name = catalog
            .get(&batch.product_id)
            .map(|p| p.name.to_lowercase())
            .unwrap_or_default();

        product_name.contains(&needle) || batch.location.to_lowercase().contains(&needle)
    }
}

/// Batches matching `filter`, in their original order.
pub fn filter_batches<'a>(
    batches: &'a [Batch],
    catalog: &ProductCatalog,
    filter: &BatchFilter,
) -> Vec<&'a Batch> {
    batches
        .iter()
        .filter(|b| filter.matches(b, catalog))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_catalog;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 7).unwrap()
    }

    fn batch(id: &str, product_id: &str, expires_in: i64, location: &str) -> Batch {
        let expiry = today() + Duration::days(expires_in);
        Batch {
            id: id.into(),
            product_id: product_id.into(),
            quantity: 5,
            expiry_date: expiry,
            entry_date: today() - Duration::days(10),
            location: location.into(),
            status: batch_status(expiry, today(), 30),
        }
    }

    #[test]
    fn test_batch_status_bands() {
        let t = today();
        assert_eq!(batch_status(t - Duration::days(1), t, 30), BatchStatus::Expired);
        assert_eq!(batch_status(t, t, 30), BatchStatus::Expiring);
        assert_eq!(batch_status(t + Duration::days(30), t, 30), BatchStatus::Expiring);
        assert_eq!(batch_status(t + Duration::days(31), t, 30), BatchStatus::Ok);
    }

    #[test]
    fn test_days_until_expiry() {
        assert_eq!(batch("1", "1", 5, "A1").days_until_expiry(today()), 5);
        assert_eq!(batch("5", "4", -5, "C2").days_until_expiry(today()), -5);
    }

    #[test]
    fn test_refresh_statuses_after_date_rolls() {
        let mut batches = vec![batch("1", "1", 5, "A1"), batch("2", "1", 45, "A2")];
        refresh_statuses(&mut batches, today() + Duration::days(20), 30);
        assert_eq!(batches[0].status, BatchStatus::Expired);
        assert_eq!(batches[1].status, BatchStatus::Expiring);
    }

    #[test]
    fn test_filter_batches() {
        let catalog = sample_catalog();
        let batches = vec![
            batch("1", "1", 5, "A1"),
            batch("3", "2", 180, "B3"),
            batch("5", "4", -5, "C2"),
        ];

        let all = filter_batches(&batches, &catalog, &BatchFilter::default());
        assert_eq!(all.len(), 3);

        let expired = filter_batches(
            &batches,
            &catalog,
            &BatchFilter {
                status: Some(BatchStatus::Expired),
                search: String::new(),
            },
        );
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].id, "5");

        let by_name = filter_batches(
            &batches,
            &catalog,
            &BatchFilter {
                status: None,
                search: "arroz".into(),
            },
        );
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "3");

        let by_location = filter_batches(
            &batches,
            &catalog,
            &BatchFilter {
                status: None,
                search: "c2".into(),
            },
        );
        assert_eq!(by_location[0].id, "5");
    }
}
