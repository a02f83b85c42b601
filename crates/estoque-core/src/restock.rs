//! # Restock Workflow
//!
//! Turns a product/quantity selection into a committed stock adjustment.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Restock List Lifecycle                               │
//! │                                                                         │
//! │  Tick products ──► RestockSelection::select()     (no stock change)     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Save list ──────► RestockBook::create_list()     stock -= qty          │
//! │        │                  status = Active                               │
//! │        │                                                                │
//! │        ├─────────► confirm_list()  → Completed    (no stock change)     │
//! │        │                                                                │
//! │        └─────────► cancel_list()   → Cancelled    stock += qty          │
//! │                                                                         │
//! │  Completed and cancelled lists move to the history and never come back. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`mark_as_restocked`] sits beside the list flow: it sets a single
//! product's stock directly from its minimum plus a replenishment quantity.

use chrono::{DateTime, Utc};

use crate::catalog::ProductCatalog;
use crate::error::{CoreError, CoreResult};
use crate::types::{RestockList, RestockListItem, RestockStatus};
use crate::validation::{validate_list_name, validate_list_size, validate_quantity, validate_stock_level};
use crate::{DEFAULT_LIST_NAME, MAX_ITEM_QUANTITY};

// =============================================================================
// Selection
// =============================================================================

/// One ticked product in the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEntry {
    pub product_id: String,
    pub quantity: i64,
}

/// The products the user has ticked while building a list.
///
/// ## Invariants
/// - Entries are unique by `product_id` (re-selecting updates the quantity)
/// - Insertion order is preserved; it becomes the list's item order
#[derive(Debug, Clone, Default)]
pub struct RestockSelection {
    entries: Vec<SelectionEntry>,
}

impl RestockSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks or unticks a product.
    ///
    /// ## Behavior
    /// - `selected = true`: quantity is clamped to `[1, current_stock]`
    ///   (never above `MAX_ITEM_QUANTITY`) and stored, updating an existing
    ///   entry in place
    /// - `selected = false`: the entry is removed
    ///
    /// ## Returns
    /// The stored quantity, or `None` when the product was unticked.
    ///
    /// ## Errors
    /// - `ProductNotFound` for an unknown id
    /// - `InsufficientStock` when selecting a product with no stock
    pub fn select(
        &mut self,
        catalog: &ProductCatalog,
        product_id: &str,
        selected: bool,
        quantity: i64,
    ) -> CoreResult<Option<i64>> {
        let product = catalog.require(product_id)?;

        if !selected {
            self.entries.retain(|e| e.product_id != product_id);
            return Ok(None);
        }

        if product.current_stock < 1 {
            return Err(CoreError::InsufficientStock {
                product_id: product_id.to_string(),
                available: product.current_stock,
                requested: quantity.max(1),
            });
        }

        let quantity = clamp_quantity(quantity, product.current_stock);

        match self.entries.iter_mut().find(|e| e.product_id == product_id) {
            Some(entry) => entry.quantity = quantity,
            None => self.entries.push(SelectionEntry {
                product_id: product_id.to_string(),
                quantity,
            }),
        }

        Ok(Some(quantity))
    }

    /// Quantity currently selected for a product.
    pub fn quantity_of(&self, product_id: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|e| e.product_id == product_id)
            .map(|e| e.quantity)
    }

    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unticks everything ("Limpar").
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Clamps a requested quantity to `[1, min(available, MAX_ITEM_QUANTITY)]`.
///
/// Any clamped quantity passes `validate_quantity`, so a selection that was
/// accepted can always be saved while stock is unchanged.
pub fn clamp_quantity(requested: i64, available: i64) -> i64 {
    requested.clamp(1, available.min(MAX_ITEM_QUANTITY).max(1))
}

// =============================================================================
// Restock Book
// =============================================================================

/// Owns every restock list of the session: the active ones and the history.
///
/// History is kept in insertion order; newest-first is a presentation
/// concern served by [`history_newest_first`](Self::history_newest_first).
#[derive(Debug, Clone)]
pub struct RestockBook {
    active: Vec<RestockList>,
    history: Vec<RestockList>,
    default_name: String,
    /// Millis of the last issued list id; ids stay strictly increasing even
    /// when two lists are created within the same millisecond.
    last_id_millis: i64,
}

impl Default for RestockBook {
    fn default() -> Self {
        Self::new()
    }
}

impl RestockBook {
    /// Creates an empty book using [`DEFAULT_LIST_NAME`] for blank names.
    pub fn new() -> Self {
        Self::with_default_name(DEFAULT_LIST_NAME)
    }

    pub fn with_default_name(default_name: impl Into<String>) -> Self {
        RestockBook {
            active: Vec::new(),
            history: Vec::new(),
            default_name: default_name.into(),
            last_id_millis: 0,
        }
    }

    /// Pre-populates the history (seed data). Only terminal lists are
    /// accepted; an active list is rejected with `InvalidListStatus`.
    pub fn with_history(mut self, history: Vec<RestockList>) -> CoreResult<Self> {
        for list in history {
            if !list.status.is_terminal() {
                return Err(CoreError::InvalidListStatus {
                    list_id: list.id,
                    current_status: list.status,
                });
            }
            self.history.push(list);
        }
        Ok(self)
    }

    /// Creates a list now. See [`create_list_at`](Self::create_list_at).
    pub fn create_list(
        &mut self,
        catalog: &mut ProductCatalog,
        name: &str,
        selection: &RestockSelection,
    ) -> CoreResult<RestockList> {
        self.create_list_at(catalog, name, selection, Utc::now())
    }

    /// Commits a selection as a new active list.
    ///
    /// ## Steps
    /// 1. Reject an empty selection (`EmptySelection`)
    /// 2. Re-check every entry against current stock; stock may have been
    ///    edited since the product was ticked. Any failure rejects the whole
    ///    list and nothing is mutated.
    /// 3. Deduct each quantity from its product
    /// 4. Snapshot names, register the list as active and return it
    pub fn create_list_at(
        &mut self,
        catalog: &mut ProductCatalog,
        name: &str,
        selection: &RestockSelection,
        now: DateTime<Utc>,
    ) -> CoreResult<RestockList> {
        if selection.is_empty() {
            return Err(CoreError::EmptySelection);
        }
        validate_list_size(selection.len())?;
        let name = validate_list_name(name, &self.default_name)?;

        let mut items = Vec::with_capacity(selection.len());
        for entry in selection.entries() {
            let product = catalog.require(&entry.product_id)?;
            validate_quantity(entry.quantity)?;
            if entry.quantity > product.current_stock {
                return Err(CoreError::InsufficientStock {
                    product_id: entry.product_id.clone(),
                    available: product.current_stock,
                    requested: entry.quantity,
                });
            }
            items.push(RestockListItem {
                product_id: entry.product_id.clone(),
                name: product.name.clone(),
                quantity: entry.quantity,
            });
        }

        // Every entry passed; none of these deductions can fail.
        for item in &items {
            catalog.adjust_stock(&item.product_id, -item.quantity)?;
        }

        let list = RestockList {
            id: self.next_list_id(now),
            name,
            items,
            created_at: now,
            status: RestockStatus::Active,
        };
        self.active.push(list.clone());

        Ok(list)
    }

    /// Marks an active list as completed and moves it to the history.
    ///
    /// Stock is not touched: it was deducted when the list was created.
    pub fn confirm_list(&mut self, list_id: &str) -> CoreResult<RestockList> {
        let mut list = self.take_active(list_id)?;
        list.status = RestockStatus::Completed;
        self.history.push(list.clone());
        Ok(list)
    }

    /// Cancels an active list, returns its stock and moves it to the history.
    ///
    /// Exact inverse of `create_list`'s stock effect.
    pub fn cancel_list(
        &mut self,
        catalog: &mut ProductCatalog,
        list_id: &str,
    ) -> CoreResult<RestockList> {
        let index = self.active_index(list_id)?;

        // Check every restored level first so a missing product or one that
        // would exceed the stock limit cannot leave the stock half-restored.
        for item in &self.active[index].items {
            let current = catalog.require(&item.product_id)?.current_stock;
            validate_stock_level("currentStock", current.saturating_add(item.quantity))?;
        }

        let mut list = self.active.remove(index);
        for item in &list.items {
            catalog.adjust_stock(&item.product_id, item.quantity)?;
        }

        list.status = RestockStatus::Cancelled;
        self.history.push(list.clone());
        Ok(list)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Lists awaiting confirmation or cancellation.
    pub fn active_lists(&self) -> &[RestockList] {
        &self.active
    }

    /// Terminal lists in the order they reached their terminal state.
    pub fn history(&self) -> &[RestockList] {
        &self.history
    }

    pub fn history_newest_first(&self) -> impl Iterator<Item = &RestockList> {
        self.history.iter().rev()
    }

    /// Finds a list by id, active or historical.
    pub fn find(&self, list_id: &str) -> Option<&RestockList> {
        self.active
            .iter()
            .chain(self.history.iter())
            .find(|l| l.id == list_id)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn active_index(&self, list_id: &str) -> CoreResult<usize> {
        if let Some(index) = self.active.iter().position(|l| l.id == list_id) {
            return Ok(index);
        }
        match self.history.iter().find(|l| l.id == list_id) {
            Some(list) => Err(CoreError::InvalidListStatus {
                list_id: list_id.to_string(),
                current_status: list.status,
            }),
            None => Err(CoreError::RestockListNotFound(list_id.to_string())),
        }
    }

    fn take_active(&mut self, list_id: &str) -> CoreResult<RestockList> {
        let index = self.active_index(list_id)?;
        Ok(self.active.remove(index))
    }

    fn next_list_id(&mut self, now: DateTime<Utc>) -> String {
        let millis = now.timestamp_millis().max(self.last_id_millis + 1);
        self.last_id_millis = millis;
        format!("list_{}", millis)
    }
}

// =============================================================================
// Mark As Restocked
// =============================================================================

/// Sets a product's stock to `min_stock + replenishment`.
///
/// ## Why a parameter?
/// The shelf count after a replenishment run depends on what was actually
/// put out; callers pass it explicitly (the session falls back to its
/// configured default).
///
/// ## Returns
/// The new stock level.
pub fn mark_as_restocked(
    catalog: &mut ProductCatalog,
    product_id: &str,
    replenishment: i64,
) -> CoreResult<i64> {
    validate_stock_level("replenishment", replenishment)?;
    let min_stock = catalog.require(product_id)?.min_stock;
    let target = min_stock + replenishment;
    catalog.update_stock(product_id, target)?;
    Ok(target)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_catalog;
    use crate::DEFAULT_REPLENISHMENT;

    fn selection(catalog: &ProductCatalog, picks: &[(&str, i64)]) -> RestockSelection {
        let mut selection = RestockSelection::new();
        for (id, qty) in picks {
            selection.select(catalog, id, true, *qty).unwrap();
        }
        selection
    }

    fn stock(catalog: &ProductCatalog, id: &str) -> i64 {
        catalog.get(id).unwrap().current_stock
    }

    #[test]
    fn test_select_clamps_quantity() {
        let catalog = sample_catalog();
        let mut selection = RestockSelection::new();

        assert_eq!(selection.select(&catalog, "3", true, 0).unwrap(), Some(1));
        assert_eq!(selection.select(&catalog, "3", true, -4).unwrap(), Some(1));
        assert_eq!(selection.select(&catalog, "3", true, 50).unwrap(), Some(5));
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.quantity_of("3"), Some(5));

        // selecting never touches stock
        assert_eq!(stock(&catalog, "3"), 5);
    }

    #[test]
    fn test_selected_quantity_can_always_be_saved() {
        let mut catalog = sample_catalog();
        catalog.update_stock("2", MAX_ITEM_QUANTITY).unwrap();
        let mut selection = RestockSelection::new();
        let mut book = RestockBook::new();

        let picked = selection.select(&catalog, "2", true, i64::MAX).unwrap();
        assert_eq!(picked, Some(MAX_ITEM_QUANTITY));

        let list = book.create_list(&mut catalog, "", &selection).unwrap();
        assert_eq!(list.items[0].quantity, MAX_ITEM_QUANTITY);
        assert_eq!(stock(&catalog, "2"), 0);
    }

    #[test]
    fn test_clamp_quantity_respects_item_limit() {
        assert_eq!(clamp_quantity(20_000, 20_000), MAX_ITEM_QUANTITY);
        assert_eq!(clamp_quantity(3, 20_000), 3);
        assert_eq!(clamp_quantity(0, 0), 1);
    }

    #[test]
    fn test_select_and_unselect() {
        let catalog = sample_catalog();
        let mut selection = RestockSelection::new();
        selection.select(&catalog, "1", true, 2).unwrap();
        selection.select(&catalog, "2", true, 3).unwrap();
        assert_eq!(selection.select(&catalog, "1", false, 0).unwrap(), None);

        let ids: Vec<&str> = selection.entries().iter().map(|e| e.product_id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);

        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_rejects_unknown_and_out_of_stock() {
        let mut catalog = sample_catalog();
        let mut selection = RestockSelection::new();
        assert!(matches!(
            selection.select(&catalog, "99", true, 1),
            Err(CoreError::ProductNotFound(_))
        ));

        catalog.update_stock("3", 0).unwrap();
        assert!(matches!(
            selection.select(&catalog, "3", true, 1),
            Err(CoreError::InsufficientStock { available: 0, .. })
        ));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_create_list_with_empty_selection_fails_without_mutation() {
        let mut catalog = sample_catalog();
        let before: Vec<i64> = catalog.products().iter().map(|p| p.current_stock).collect();
        let mut book = RestockBook::new();

        let result = book.create_list(&mut catalog, "Vazia", &RestockSelection::new());
        assert!(matches!(result, Err(CoreError::EmptySelection)));

        let after: Vec<i64> = catalog.products().iter().map(|p| p.current_stock).collect();
        assert_eq!(before, after);
        assert!(book.active_lists().is_empty());
    }

    #[test]
    fn test_create_list_deducts_stock() {
        let mut catalog = sample_catalog();
        catalog.update_stock("1", 10).unwrap();
        let sel = selection(&catalog, &[("1", 3)]);

        let mut book = RestockBook::new();
        let list = book.create_list(&mut catalog, "Corredor 1", &sel).unwrap();

        assert_eq!(stock(&catalog, "1"), 7);
        assert_eq!(list.status, RestockStatus::Active);
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].quantity, 3);
        assert_eq!(list.items[0].name, "Leite Integral");
        assert_eq!(list.name, "Corredor 1");
        assert!(list.id.starts_with("list_"));
        assert_eq!(book.active_lists().len(), 1);
    }

    #[test]
    fn test_create_list_uses_default_name() {
        let mut catalog = sample_catalog();
        let sel = selection(&catalog, &[("2", 1)]);
        let mut book = RestockBook::new();
        let list = book.create_list(&mut catalog, "   ", &sel).unwrap();
        assert_eq!(list.name, DEFAULT_LIST_NAME);
    }

    #[test]
    fn test_create_list_rejects_stale_selection_atomically() {
        let mut catalog = sample_catalog();
        let sel = selection(&catalog, &[("2", 10), ("3", 5)]);

        // stock edited after selection
        catalog.update_stock("3", 2).unwrap();

        let mut book = RestockBook::new();
        let result = book.create_list(&mut catalog, "Lista", &sel);
        assert!(matches!(
            result,
            Err(CoreError::InsufficientStock { available: 2, requested: 5, .. })
        ));
        // product 2 was checked first but must not have been deducted
        assert_eq!(stock(&catalog, "2"), 25);
        assert_eq!(stock(&catalog, "3"), 2);
        assert!(book.active_lists().is_empty());
    }

    #[test]
    fn test_list_ids_strictly_increase() {
        let mut catalog = sample_catalog();
        let sel = selection(&catalog, &[("2", 1)]);
        let mut book = RestockBook::new();
        let now = Utc::now();

        let a = book.create_list_at(&mut catalog, "A", &sel, now).unwrap();
        let b = book.create_list_at(&mut catalog, "B", &sel, now).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.id, format!("list_{}", now.timestamp_millis()));
        assert_eq!(b.id, format!("list_{}", now.timestamp_millis() + 1));
    }

    #[test]
    fn test_confirm_list_is_one_way_and_keeps_stock() {
        let mut catalog = sample_catalog();
        let sel = selection(&catalog, &[("1", 4), ("5", 2)]);
        let mut book = RestockBook::new();
        let list = book.create_list(&mut catalog, "Lista", &sel).unwrap();
        let after_create: Vec<i64> = catalog.products().iter().map(|p| p.current_stock).collect();

        let completed = book.confirm_list(&list.id).unwrap();
        assert_eq!(completed.status, RestockStatus::Completed);
        let after_confirm: Vec<i64> = catalog.products().iter().map(|p| p.current_stock).collect();
        assert_eq!(after_create, after_confirm);

        assert!(matches!(
            book.confirm_list(&list.id),
            Err(CoreError::InvalidListStatus {
                current_status: RestockStatus::Completed,
                ..
            })
        ));
        assert!(matches!(
            book.cancel_list(&mut catalog, &list.id),
            Err(CoreError::InvalidListStatus { .. })
        ));
        assert_eq!(book.history().len(), 1);
        assert!(book.active_lists().is_empty());
    }

    #[test]
    fn test_cancel_list_restores_stock_exactly() {
        let mut catalog = sample_catalog();
        let before: Vec<i64> = catalog.products().iter().map(|p| p.current_stock).collect();

        let sel = selection(&catalog, &[("1", 18), ("3", 1), ("4", 7)]);
        let mut book = RestockBook::new();
        let list = book.create_list(&mut catalog, "Lista", &sel).unwrap();
        assert_eq!(stock(&catalog, "1"), 0);

        let cancelled = book.cancel_list(&mut catalog, &list.id).unwrap();
        assert_eq!(cancelled.status, RestockStatus::Cancelled);

        let after: Vec<i64> = catalog.products().iter().map(|p| p.current_stock).collect();
        assert_eq!(before, after);
        assert_eq!(book.find(&list.id).unwrap().status, RestockStatus::Cancelled);
    }

    #[test]
    fn test_cancel_list_over_limit_changes_nothing() {
        let mut catalog = sample_catalog();
        let selection = selection(&catalog, &[("1", 4), ("2", 5)]);
        let mut book = RestockBook::new();
        let list = book.create_list(&mut catalog, "", &selection).unwrap();

        catalog.update_stock("2", MAX_ITEM_QUANTITY - 1).unwrap();
        let result = book.cancel_list(&mut catalog, &list.id);

        assert!(matches!(result, Err(CoreError::Validation(_))));
        assert_eq!(stock(&catalog, "1"), 14);
        assert_eq!(stock(&catalog, "2"), MAX_ITEM_QUANTITY - 1);
        assert_eq!(book.active_lists().len(), 1);
    }

    #[test]
    fn test_unknown_list() {
        let mut catalog = sample_catalog();
        let mut book = RestockBook::new();
        assert!(matches!(
            book.confirm_list("list_0"),
            Err(CoreError::RestockListNotFound(_))
        ));
        assert!(matches!(
            book.cancel_list(&mut catalog, "list_0"),
            Err(CoreError::RestockListNotFound(_))
        ));
    }

    #[test]
    fn test_history_order() {
        let mut catalog = sample_catalog();
        let sel = selection(&catalog, &[("2", 1)]);
        let mut book = RestockBook::new();
        let first = book.create_list(&mut catalog, "Primeira", &sel).unwrap();
        let second = book.create_list(&mut catalog, "Segunda", &sel).unwrap();
        book.confirm_list(&first.id).unwrap();
        book.cancel_list(&mut catalog, &second.id).unwrap();

        let names: Vec<&str> = book.history().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Primeira", "Segunda"]);
        let newest: Vec<&str> = book.history_newest_first().map(|l| l.name.as_str()).collect();
        assert_eq!(newest, vec!["Segunda", "Primeira"]);
    }

    #[test]
    fn test_with_history_rejects_active_lists() {
        let list = RestockList {
            id: "hist_3".into(),
            name: "Reposição Emergencial".into(),
            items: vec![],
            created_at: Utc::now(),
            status: RestockStatus::Active,
        };
        assert!(RestockBook::new().with_history(vec![list]).is_err());
    }

    #[test]
    fn test_mark_as_restocked() {
        let mut catalog = sample_catalog();
        assert_eq!(
            mark_as_restocked(&mut catalog, "3", DEFAULT_REPLENISHMENT).unwrap(),
            20
        );
        assert_eq!(stock(&catalog, "3"), 20);
        assert!(!catalog.get("3").unwrap().is_low_stock());

        assert_eq!(mark_as_restocked(&mut catalog, "4", 0).unwrap(), 10);
        assert!(mark_as_restocked(&mut catalog, "4", -1).is_err());
        assert!(mark_as_restocked(&mut catalog, "99", 5).is_err());
    }
}
