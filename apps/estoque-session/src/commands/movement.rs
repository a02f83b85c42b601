//! # Movement Commands
//!
//! Stock movement history and loss registration.

use estoque_core::movement::{MovementFilter, NewMovement};
use estoque_core::validation::validate_quantity;
use estoque_core::{CoreError, CoreResult, Movement, MovementType};
use estoque_sync::SyncTransport;
use tracing::{debug, info};

use crate::error::ApiResult;
use crate::notify::Notice;
use crate::state::Session;

/// Movements matching `filter`, newest first.
pub fn list_movements<T: SyncTransport>(session: &Session<T>, filter: &MovementFilter) -> Vec<Movement> {
    debug!(search = %filter.search, kind = ?filter.kind, date = ?filter.date, "list_movements command");
    session
        .inventory
        .movements
        .filter(filter)
        .into_iter()
        .cloned()
        .collect()
}

/// Registers damaged, expired or missing goods.
///
/// ## Behavior
/// - `quantity` must be positive and no larger than the current stock
/// - Stock drops by `quantity` and a loss movement is logged
/// - `batch_id`, when given, must belong to the product (`NotFound`
///   otherwise); the batch quantity drops too, never below zero
pub fn record_loss<T: SyncTransport>(
    session: &mut Session<T>,
    product_id: &str,
    quantity: i64,
    batch_id: Option<&str>,
    notes: &str,
) -> ApiResult<Movement> {
    debug!(product_id = %product_id, quantity, ?batch_id, "record_loss command");

    if let Err(err) = apply_loss(session, product_id, quantity, batch_id) {
        return Err(session.fail("Erro ao registrar perda", err));
    }

    let mut movement = NewMovement::new(product_id, MovementType::Loss, quantity);
    if let Some(batch_id) = batch_id {
        movement = movement.with_batch(batch_id);
    }
    if !notes.trim().is_empty() {
        movement = movement.with_notes(notes.trim());
    }
    let movement = session.inventory.movements.record(movement).clone();

    info!(product_id = %product_id, quantity, "Loss recorded");
    session.notify(Notice::info("Perda registrada"));
    Ok(movement)
}

fn apply_loss<T: SyncTransport>(
    session: &mut Session<T>,
    product_id: &str,
    quantity: i64,
    batch_id: Option<&str>,
) -> CoreResult<()> {
    validate_quantity(quantity)?;
    session.inventory.catalog.require(product_id)?;

    let batch_index = match batch_id {
        Some(id) => Some(
            session
                .inventory
                .batches
                .iter()
                .position(|b| b.id == id && b.product_id == product_id)
                .ok_or_else(|| CoreError::BatchNotFound(id.to_string()))?,
        ),
        None => None,
    };

    session.inventory.catalog.adjust_stock(product_id, -quantity)?;
    if let Some(index) = batch_index {
        let batch = &mut session.inventory.batches[index];
        batch.quantity = (batch.quantity - quantity).max(0);
    }
    Ok(())
}
