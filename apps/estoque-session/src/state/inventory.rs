//! # Inventory State
//!
//! Catalog, batches and movement history of the session.
//!
//! Every stock change made through the session goes through here so the
//! movement log stays in step with the catalog.

use chrono::NaiveDate;
use estoque_core::batch::refresh_statuses;
use estoque_core::movement::{MovementLog, NewMovement};
use estoque_core::{Batch, CoreResult, MovementType, Product, ProductCatalog};

/// Note attached to movements produced by manual stock edits.
pub const MANUAL_ADJUSTMENT_NOTE: &str = "Ajuste manual";

#[derive(Debug, Clone, Default)]
pub struct InventoryState {
    pub(crate) catalog: ProductCatalog,
    pub(crate) batches: Vec<Batch>,
    pub(crate) movements: MovementLog,
}

impl InventoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(catalog: ProductCatalog, batches: Vec<Batch>, movements: MovementLog) -> Self {
        InventoryState {
            catalog,
            batches,
            movements,
        }
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn movements(&self) -> &MovementLog {
        &self.movements
    }

    /// Recomputes batch statuses for `today`.
    pub fn refresh_batches(&mut self, today: NaiveDate, warning_days: i64) {
        refresh_statuses(&mut self.batches, today, warning_days);
    }

    /// Sets a product's stock and logs the difference.
    ///
    /// ## Movement
    /// ```text
    ///   delta > 0  → entry
    ///   delta < 0  → exit
    ///   delta = 0  → nothing recorded
    /// ```
    pub fn set_stock(&mut self, product_id: &str, new_quantity: i64, notes: &str) -> CoreResult<Product> {
        let previous = self.catalog.update_stock(product_id, new_quantity)?;
        let delta = new_quantity - previous;
        if delta != 0 {
            let kind = if delta > 0 {
                MovementType::Entry
            } else {
                MovementType::Exit
            };
            self.movements
                .record(NewMovement::new(product_id, kind, delta.abs()).with_notes(notes));
        }
        Ok(self.catalog.require(product_id)?.clone())
    }

    /// Logs one movement per restock line.
    pub(crate) fn record_lines<'a>(
        &mut self,
        lines: impl IntoIterator<Item = (&'a str, i64)>,
        kind: MovementType,
        notes: &str,
    ) {
        for (product_id, quantity) in lines {
            self.movements
                .record(NewMovement::new(product_id, kind, quantity).with_notes(notes));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estoque_core::catalog::NewProduct;

    fn inventory_with(stock: i64) -> (InventoryState, String) {
        let mut inventory = InventoryState::new();
        let id = inventory
            .catalog
            .add_product(NewProduct {
                name: "Arroz Branco".into(),
                current_stock: stock,
                min_stock: 15,
                ..NewProduct::default()
            })
            .unwrap()
            .id
            .clone();
        (inventory, id)
    }

    #[test]
    fn test_set_stock_logs_delta() {
        let (mut inventory, id) = inventory_with(10);

        inventory.set_stock(&id, 14, MANUAL_ADJUSTMENT_NOTE).unwrap();
        inventory.set_stock(&id, 9, MANUAL_ADJUSTMENT_NOTE).unwrap();
        inventory.set_stock(&id, 9, MANUAL_ADJUSTMENT_NOTE).unwrap();

        let log = inventory.movements().entries();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].kind, MovementType::Entry);
        assert_eq!(log[0].quantity, 4);
        assert_eq!(log[1].kind, MovementType::Exit);
        assert_eq!(log[1].quantity, 5);
    }

    #[test]
    fn test_rejected_edit_logs_nothing() {
        let (mut inventory, id) = inventory_with(10);
        assert!(inventory.set_stock(&id, -1, MANUAL_ADJUSTMENT_NOTE).is_err());
        assert_eq!(inventory.catalog().get(&id).unwrap().current_stock, 10);
        assert!(inventory.movements().is_empty());
    }
}
