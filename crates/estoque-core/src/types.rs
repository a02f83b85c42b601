//! # Domain Types
//!
//! Core domain types used throughout Estoque.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  RestockList    │   │  PendingAction  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  items[]        │   │  id (UUID)      │       │
//! │  │  barcode        │   │  status         │   │  action ────────┼──┐    │
//! │  │  min_stock      │   │  created_at     │   │  queued_at      │  │    │
//! │  │  current_stock  │   └─────────────────┘   └─────────────────┘  │    │
//! │  └─────────────────┘                                              │    │
//! │          ▲                                   ┌─────────────────┐  │    │
//! │          │             ┌─────────────────┐   │   SyncAction    │◄─┘    │
//! │  ┌───────┴─────────┐   │    Movement     │   │  create_list    │       │
//! │  │     Batch       │   │  entry / exit   │   │  restock_product│       │
//! │  │  expiry, status │   │  loss / restock │   │  complete_list  │       │
//! │  └─────────────────┘   └─────────────────┘   │  cancel_list    │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Wire names are camelCase because the mobile frontend reads these types
//! directly through the generated TypeScript bindings.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Stock Unit
// =============================================================================

/// Unit a product is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum StockUnit {
    /// Single item.
    #[default]
    Unidade,
    /// Box.
    Caixa,
    /// Shrink-wrapped bundle.
    Fardo,
}

// =============================================================================
// Product
// =============================================================================

/// A product tracked by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    pub category: String,

    pub brand: String,

    /// Barcode as scanned or typed. Never checksum-validated.
    pub barcode: String,

    /// Threshold below which the product shows up as low stock.
    pub min_stock: i64,

    /// Units on hand. Never negative.
    pub current_stock: i64,

    pub unit: StockUnit,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,

    /// Product photo URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Product {
    /// Strictly below the minimum.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.current_stock < self.min_stock
    }

    /// Shelf indicator level.
    ///
    /// ## Levels
    /// ```text
    ///   current >= min            → Ok
    ///   min/2 <= current < min    → Low
    ///   current < min/2           → Critical
    /// ```
    pub fn stock_level(&self) -> StockLevel {
        // 2·current < min avoids rounding min/2 for odd minimums
        if self.current_stock * 2 < self.min_stock {
            StockLevel::Critical
        } else if self.is_low_stock() {
            StockLevel::Low
        } else {
            StockLevel::Ok
        }
    }

    /// Units needed to reach the minimum (zero when not low).
    pub fn shortfall(&self) -> i64 {
        (self.min_stock - self.current_stock).max(0)
    }
}

/// Shelf indicator derived from stock levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    Ok,
    Low,
    Critical,
}

// =============================================================================
// Restock Lists
// =============================================================================

/// Lifecycle of a restock list.
///
/// ## State Machine
/// ```text
///              ┌──────────────► Completed (terminal)
///   Active ────┤
///              └──────────────► Cancelled (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RestockStatus {
    /// Stock has been set aside; waiting for the shelves to be filled.
    Active,
    /// Shelves filled.
    Completed,
    /// Abandoned; stock returned to the catalog.
    Cancelled,
}

impl RestockStatus {
    /// Completed and cancelled lists accept no further transitions.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RestockStatus::Active)
    }
}

impl fmt::Display for RestockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestockStatus::Active => write!(f, "active"),
            RestockStatus::Completed => write!(f, "completed"),
            RestockStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A line in a restock list.
/// Uses snapshot pattern to freeze the product name at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RestockListItem {
    pub product_id: String,
    /// Product name at time of creation (frozen).
    pub name: String,
    pub quantity: i64,
}

/// A named batch of product/quantity pairs for one shelf-replenishment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RestockList {
    /// `list_<unix millis>` of the creation time.
    pub id: String,
    pub name: String,
    /// Ordered lines; product ids are unique within a list.
    pub items: Vec<RestockListItem>,
    pub created_at: DateTime<Utc>,
    pub status: RestockStatus,
}

impl RestockList {
    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

// =============================================================================
// Pending Actions
// =============================================================================

/// A mutation the user performed while offline, awaiting synchronization.
///
/// ## Wire Format
/// ```json
/// { "type": "complete_restock_list",
///   "data": { "listId": "list_1712345678901", "completedAt": "2025-04-07T14:45:00Z" } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum SyncAction {
    /// A new list, carried in full.
    CreateRestockList(RestockList),

    /// A product marked as restocked on the shelf.
    #[serde(rename_all = "camelCase")]
    RestockProduct {
        product_id: String,
        restocked_at: DateTime<Utc>,
    },

    #[serde(rename_all = "camelCase")]
    CompleteRestockList {
        list_id: String,
        completed_at: DateTime<Utc>,
    },

    #[serde(rename_all = "camelCase")]
    CancelRestockList {
        list_id: String,
        cancelled_at: DateTime<Utc>,
    },
}

impl SyncAction {
    /// The wire tag of this action.
    pub fn kind(&self) -> &'static str {
        match self {
            SyncAction::CreateRestockList(_) => "create_restock_list",
            SyncAction::RestockProduct { .. } => "restock_product",
            SyncAction::CompleteRestockList { .. } => "complete_restock_list",
            SyncAction::CancelRestockList { .. } => "cancel_restock_list",
        }
    }
}

/// An entry in the offline queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PendingAction {
    /// UUID v4.
    pub id: String,
    pub action: SyncAction,
    pub queued_at: DateTime<Utc>,
}

// =============================================================================
// Batches
// =============================================================================

/// Expiry status of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Ok,
    Expiring,
    Expired,
}

/// A tracked quantity of a product with its own expiry and location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: String,
    pub product_id: String,
    pub quantity: i64,
    pub expiry_date: NaiveDate,
    pub entry_date: NaiveDate,
    /// Shelf / aisle code, e.g. "B3".
    pub location: String,
    pub status: BatchStatus,
}

// =============================================================================
// Movements
// =============================================================================

/// Kind of stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    /// Goods received.
    Entry,
    /// Goods taken out of storage (e.g. to the shelf).
    Exit,
    /// Damaged, expired or missing goods.
    Loss,
    /// Shelf marked as replenished.
    Restock,
}

/// A single entry in the movement history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: String,
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: MovementType,
    pub quantity: i64,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(current: i64, min: i64) -> Product {
        Product {
            id: "1".into(),
            name: "Leite Integral".into(),
            category: "Laticínios".into(),
            brand: "Fazenda Feliz".into(),
            barcode: "7891234567890".into(),
            min_stock: min,
            current_stock: current,
            unit: StockUnit::Unidade,
            expiry_date: None,
            image: None,
        }
    }

    #[test]
    fn test_low_stock_is_strict() {
        assert!(product(19, 20).is_low_stock());
        assert!(!product(20, 20).is_low_stock());
        assert!(!product(21, 20).is_low_stock());
    }

    #[test]
    fn test_stock_level() {
        assert_eq!(product(20, 20).stock_level(), StockLevel::Ok);
        assert_eq!(product(18, 20).stock_level(), StockLevel::Low);
        assert_eq!(product(10, 20).stock_level(), StockLevel::Low);
        assert_eq!(product(9, 20).stock_level(), StockLevel::Critical);
        // odd minimum: 7 < 15/2 = 7.5
        assert_eq!(product(7, 15).stock_level(), StockLevel::Critical);
        assert_eq!(product(8, 15).stock_level(), StockLevel::Low);
    }

    #[test]
    fn test_shortfall() {
        assert_eq!(product(5, 15).shortfall(), 10);
        assert_eq!(product(25, 15).shortfall(), 0);
    }

    #[test]
    fn test_restock_status_terminal() {
        assert!(!RestockStatus::Active.is_terminal());
        assert!(RestockStatus::Completed.is_terminal());
        assert!(RestockStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_sync_action_wire_format() {
        let action = SyncAction::CompleteRestockList {
            list_id: "list_1".into(),
            completed_at: DateTime::parse_from_rfc3339("2025-04-07T14:45:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "complete_restock_list");
        assert_eq!(json["data"]["listId"], "list_1");
        assert_eq!(action.kind(), "complete_restock_list");
    }

    #[test]
    fn test_movement_kind_serializes_as_type() {
        let movement = Movement {
            id: "m1".into(),
            product_id: "1".into(),
            batch_id: None,
            kind: MovementType::Loss,
            quantity: 2,
            date: Utc::now(),
            notes: Some("Produto danificado".into()),
            user_id: None,
        };
        let json = serde_json::to_value(&movement).unwrap();
        assert_eq!(json["type"], "loss");
        assert!(json.get("batchId").is_none());
    }
}
