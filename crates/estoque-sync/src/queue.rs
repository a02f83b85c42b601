//! # Offline Queue
//!
//! Actions performed while offline, in the order they happened.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  enqueue() ──► [A1, A2, A3] ──► snapshot() ──► transport.push()        │
//! │                     ▲                                │                  │
//! │                     │  failure: untouched            │ success          │
//! │                     └────────────────────────────────┤                  │
//! │                                                      ▼                  │
//! │                                    acknowledge(snapshot) → []           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use estoque_core::{PendingAction, SyncAction};
use uuid::Uuid;

/// The pending-action queue. `len()` is the pending counter shown in the UI.
#[derive(Debug, Clone, Default)]
pub struct OfflineQueue {
    pending: Vec<PendingAction>,
}

impl OfflineQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an action stamped with the current time.
    pub fn enqueue(&mut self, action: SyncAction) -> &PendingAction {
        self.enqueue_at(action, Utc::now())
    }

    pub fn enqueue_at(&mut self, action: SyncAction, queued_at: DateTime<Utc>) -> &PendingAction {
        self.pending.push(PendingAction {
            id: Uuid::new_v4().to_string(),
            action,
            queued_at,
        });
        &self.pending[self.pending.len() - 1]
    }

    /// Copy of the queue handed to the transport.
    pub fn snapshot(&self) -> Vec<PendingAction> {
        self.pending.clone()
    }

    /// Removes the actions that were synced, keeping anything queued after
    /// the snapshot was taken.
    ///
    /// ## Returns
    /// The number of actions removed.
    pub fn acknowledge(&mut self, synced: &[PendingAction]) -> usize {
        let ids: HashSet<&str> = synced.iter().map(|a| a.id.as_str()).collect();
        let before = self.pending.len();
        self.pending.retain(|a| !ids.contains(a.id.as_str()));
        before - self.pending.len()
    }

    pub fn actions(&self) -> &[PendingAction] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// The queue as a JSON array, in wire format.
    pub fn to_json(&self) -> crate::SyncResult<String> {
        Ok(serde_json::to_string(&self.pending)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restock(id: &str) -> SyncAction {
        SyncAction::RestockProduct {
            product_id: id.to_string(),
            restocked_at: Utc::now(),
        }
    }

    #[test]
    fn test_enqueue_increments_counter() {
        let mut queue = OfflineQueue::new();
        let first_id = queue.enqueue(restock("1")).id.clone();
        queue.enqueue(restock("2"));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.actions()[0].id, first_id);
        assert_ne!(queue.actions()[0].id, queue.actions()[1].id);
    }

    #[test]
    fn test_acknowledge_keeps_late_arrivals() {
        let mut queue = OfflineQueue::new();
        queue.enqueue(restock("1"));
        queue.enqueue(restock("2"));
        let snapshot = queue.snapshot();
        queue.enqueue(restock("3"));

        assert_eq!(queue.acknowledge(&snapshot), 2);
        assert_eq!(queue.len(), 1);
        assert!(matches!(
            &queue.actions()[0].action,
            SyncAction::RestockProduct { product_id, .. } if product_id == "3"
        ));
    }

    #[test]
    fn test_to_json_uses_tagged_actions() {
        let mut queue = OfflineQueue::new();
        queue.enqueue(restock("4"));
        let json = queue.to_json().unwrap();
        assert!(json.contains("\"type\":\"restock_product\""));
        assert!(json.contains("\"productId\":\"4\""));
    }
}
