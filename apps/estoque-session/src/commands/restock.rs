//! # Restock Commands
//!
//! Shelf restocking: pick products, build a list, then confirm or cancel it.
//!
//! ## List Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Restock Lifecycle                                    │
//! │                                                                         │
//! │  ┌──────────┐  create_list   ┌──────────┐  confirm_list  ┌───────────┐  │
//! │  │Selection │───────────────►│  Active  │───────────────►│ Completed │  │
//! │  │          │  stock -= qty  │          │  stock as is   │           │  │
//! │  └──────────┘                └──────────┘                └───────────┘  │
//! │       ▲                           │                                     │
//! │  select_product                   │ cancel_list                         │
//! │  clear_selection                  ▼ stock += qty                        │
//! │                              ┌───────────┐                              │
//! │                              │ Cancelled │                              │
//! │                              └───────────┘                              │
//! │                                                                         │
//! │  Offline: each transition also queues a SyncAction.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use estoque_core::restock::{self, SelectionEntry};
use estoque_core::{CoreError, MovementType, Product, RestockList, SyncAction};
use estoque_sync::SyncTransport;
use tracing::{debug, info, warn};

use crate::error::{ApiError, ApiResult};
use crate::notify::Notice;
use crate::state::Session;

/// Note on movements produced by list creation.
pub const SHELF_RESTOCK_NOTE: &str = "Reposição na prateleira";
/// Note on movements produced by list cancellation.
pub const LIST_CANCELLED_NOTE: &str = "Lista de reposição cancelada";
/// Note on movements produced by marking a product as restocked.
pub const PRODUCT_RESTOCKED_NOTE: &str = "Produto reposto";

// =============================================================================
// Selection
// =============================================================================

/// Ticks or unticks a product on the restock screen.
///
/// ## Returns
/// The stored quantity (clamped to `[1, current_stock]`), or `None` when the
/// product was unticked.
pub fn select_product<T: SyncTransport>(
    session: &mut Session<T>,
    product_id: &str,
    selected: bool,
    quantity: i64,
) -> ApiResult<Option<i64>> {
    debug!(product_id = %product_id, selected, quantity, "select_product command");

    let result = session
        .restock
        .selection
        .select(&session.inventory.catalog, product_id, selected, quantity);

    result.map_err(|err| session.fail("Produto indisponível", err))
}

pub fn get_selection<T: SyncTransport>(session: &Session<T>) -> Vec<SelectionEntry> {
    session.restock.selection.entries().to_vec()
}

pub fn clear_selection<T: SyncTransport>(session: &mut Session<T>) {
    debug!("clear_selection command");
    session.restock.selection.clear();
}

// =============================================================================
// List Lifecycle
// =============================================================================

/// Saves the current selection as an active restock list.
///
/// ## Behavior
/// - Empty selection: "Nenhum produto selecionado", nothing changes
/// - Every line is checked against current stock before anything is
///   deducted; one bad line rejects the whole list
/// - On success: stock is deducted, one exit movement per line is logged,
///   the selection is cleared and `CreateRestockList` is queued if offline
///
/// ## Arguments
/// * `name` - List name; blank falls back to the configured default
pub fn create_list<T: SyncTransport>(session: &mut Session<T>, name: &str) -> ApiResult<RestockList> {
    debug!(name = %name, items = session.restock.selection.len(), "create_list command");

    let result = session.restock.book.create_list(
        &mut session.inventory.catalog,
        name,
        &session.restock.selection,
    );

    let list = match result {
        Ok(list) => list,
        Err(CoreError::EmptySelection) => {
            session.notify(
                Notice::destructive("Nenhum produto selecionado")
                    .with_description("Adicione pelo menos um produto à lista de reposição."),
            );
            return Err(CoreError::EmptySelection.into());
        }
        Err(err) => {
            warn!(error = %err, "Restock list rejected");
            return Err(session.fail("Erro ao criar lista", err));
        }
    };

    session.inventory.record_lines(
        list.items.iter().map(|i| (i.product_id.as_str(), i.quantity)),
        MovementType::Exit,
        SHELF_RESTOCK_NOTE,
    );
    session.restock.selection.clear();
    session.sync.record(SyncAction::CreateRestockList(list.clone()));

    info!(list_id = %list.id, items = list.items.len(), total = list.total_quantity(), "Restock list created");
    session.notify(
        Notice::success("Lista de reposição criada").with_description(format!(
            "A lista \"{}\" está ativa e pronta para reposição.",
            list.name
        )),
    );
    Ok(list)
}

/// Marks an active list as completed. Stock is not touched.
pub fn confirm_list<T: SyncTransport>(session: &mut Session<T>, list_id: &str) -> ApiResult<RestockList> {
    debug!(list_id = %list_id, "confirm_list command");

    let list = match session.restock.book.confirm_list(list_id) {
        Ok(list) => list,
        Err(err) => return Err(session.fail("Erro ao concluir lista", err)),
    };

    session.sync.record(SyncAction::CompleteRestockList {
        list_id: list.id.clone(),
        completed_at: Utc::now(),
    });

    info!(list_id = %list.id, "Restock list completed");
    session.notify(
        Notice::success("Reposição concluída")
            .with_description(format!("A lista \"{}\" foi concluída com sucesso.", list.name)),
    );
    Ok(list)
}

/// Cancels an active list and returns every line's quantity to stock.
pub fn cancel_list<T: SyncTransport>(session: &mut Session<T>, list_id: &str) -> ApiResult<RestockList> {
    debug!(list_id = %list_id, "cancel_list command");

    let result = session
        .restock
        .book
        .cancel_list(&mut session.inventory.catalog, list_id);
    let list = match result {
        Ok(list) => list,
        Err(err) => return Err(session.fail("Erro ao cancelar lista", err)),
    };

    session.inventory.record_lines(
        list.items.iter().map(|i| (i.product_id.as_str(), i.quantity)),
        MovementType::Entry,
        LIST_CANCELLED_NOTE,
    );
    session.sync.record(SyncAction::CancelRestockList {
        list_id: list.id.clone(),
        cancelled_at: Utc::now(),
    });

    info!(list_id = %list.id, "Restock list cancelled");
    session.notify(
        Notice::destructive("Lista cancelada").with_description(format!(
            "A lista \"{}\" foi cancelada e o estoque foi restaurado.",
            list.name
        )),
    );
    Ok(list)
}

/// Marks a low-stock product as replenished on the shelf.
///
/// ## Behavior
/// - Stock becomes `min_stock + replenishment`
/// - `replenishment` defaults to `restock.default_replenishment`
/// - A rise is logged as a restock movement, a drop as an exit
/// - `RestockProduct` is queued if offline
pub fn mark_as_restocked<T: SyncTransport>(
    session: &mut Session<T>,
    product_id: &str,
    replenishment: Option<i64>,
) -> ApiResult<Product> {
    let replenishment = replenishment.unwrap_or(session.config().restock.default_replenishment);
    debug!(product_id = %product_id, replenishment, "mark_as_restocked command");

    let previous = match session.inventory.catalog.require(product_id) {
        Ok(product) => product.current_stock,
        Err(err) => return Err(session.fail("Erro ao repor produto", err)),
    };
    let target = match restock::mark_as_restocked(&mut session.inventory.catalog, product_id, replenishment) {
        Ok(target) => target,
        Err(err) => return Err(session.fail("Erro ao repor produto", err)),
    };

    let delta = target - previous;
    if delta != 0 {
        let kind = if delta > 0 {
            MovementType::Restock
        } else {
            MovementType::Exit
        };
        session
            .inventory
            .record_lines([(product_id, delta.abs())], kind, PRODUCT_RESTOCKED_NOTE);
    }

    session.sync.record(SyncAction::RestockProduct {
        product_id: product_id.to_string(),
        restocked_at: Utc::now(),
    });

    info!(product_id = %product_id, previous, stock = target, "Product restocked");
    session.notify(
        Notice::success("Produto reposto")
            .with_description("O produto foi marcado como reposto nas prateleiras."),
    );
    Ok(session.inventory.catalog.require(product_id)?.clone())
}

// =============================================================================
// Reads
// =============================================================================

pub fn active_lists<T: SyncTransport>(session: &Session<T>) -> Vec<RestockList> {
    debug!("active_lists command");
    session.restock.book.active_lists().to_vec()
}

/// Completed and cancelled lists, newest first.
pub fn restock_history<T: SyncTransport>(session: &Session<T>) -> Vec<RestockList> {
    debug!("restock_history command");
    session.restock.book.history_newest_first().cloned().collect()
}

/// Any list by id, for the read-only detail view.
pub fn get_list<T: SyncTransport>(session: &Session<T>, list_id: &str) -> ApiResult<RestockList> {
    session
        .restock
        .book
        .find(list_id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Restock list", list_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::product::get_product;
    use crate::config::AppConfig;
    use crate::error::ErrorCode;
    use crate::notify::{NoticeVariant, RecordingNotifier};
    use crate::seed::seeded_session;
    use estoque_core::RestockStatus;
    use std::sync::Arc;

    fn session() -> (Session, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        (seeded_session(AppConfig::default(), notifier.clone()), notifier)
    }

    fn stock(session: &Session, id: &str) -> i64 {
        get_product(session, id).unwrap().current_stock
    }

    #[test]
    fn test_create_list_deducts_and_logs() {
        let (mut session, notifier) = session();
        select_product(&mut session, "2", true, 3).unwrap();
        select_product(&mut session, "5", true, 2).unwrap();
        let movements_before = session.inventory().movements().len();

        let list = create_list(&mut session, "Reposição Semanal").unwrap();

        assert_eq!(list.status, RestockStatus::Active);
        assert_eq!(list.items.len(), 2);
        assert_eq!(stock(&session, "2"), 22);
        assert_eq!(stock(&session, "5"), 20);
        assert!(get_selection(&session).is_empty());
        assert_eq!(session.inventory().movements().len(), movements_before + 2);
        assert_eq!(notifier.last().unwrap().title, "Lista de reposição criada");
        // online: nothing to queue
        assert_eq!(session.sync_engine().pending_count(), 0);
    }

    #[test]
    fn test_create_empty_list_is_rejected() {
        let (mut session, notifier) = session();
        let err = create_list(&mut session, "").unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(active_lists(&session).is_empty());
        assert_eq!(notifier.titles(), vec!["Nenhum produto selecionado"]);
    }

    #[test]
    fn test_blank_name_uses_configured_default() {
        let notifier = Arc::new(RecordingNotifier::new());
        let mut config = AppConfig::default();
        config.restock.default_list_name = "Reposição Diária".into();
        let mut session = seeded_session(config, notifier);

        select_product(&mut session, "1", true, 1).unwrap();
        let list = create_list(&mut session, "   ").unwrap();
        assert_eq!(list.name, "Reposição Diária");
    }

    #[test]
    fn test_cancel_restores_stock() {
        let (mut session, notifier) = session();
        select_product(&mut session, "1", true, 4).unwrap();
        let list = create_list(&mut session, "").unwrap();
        assert_eq!(stock(&session, "1"), 14);

        let cancelled = cancel_list(&mut session, &list.id).unwrap();
        assert_eq!(cancelled.status, RestockStatus::Cancelled);
        assert_eq!(stock(&session, "1"), 18);

        let notice = notifier.last().unwrap();
        assert_eq!(notice.title, "Lista cancelada");
        assert_eq!(notice.variant, NoticeVariant::Destructive);

        let last = session.inventory().movements().entries().last().unwrap().clone();
        assert_eq!(last.kind, MovementType::Entry);
        assert_eq!(last.quantity, 4);
    }

    #[test]
    fn test_closed_list_cannot_change() {
        let (mut session, notifier) = session();
        select_product(&mut session, "2", true, 1).unwrap();
        let list = create_list(&mut session, "").unwrap();
        confirm_list(&mut session, &list.id).unwrap();

        let err = confirm_list(&mut session, &list.id).unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
        let err = cancel_list(&mut session, &list.id).unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
        assert_eq!(stock(&session, "2"), 24);

        let err = confirm_list(&mut session, "list_0").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(notifier.last().unwrap().title, "Erro ao concluir lista");
    }

    #[test]
    fn test_mark_as_restocked_default_and_explicit() {
        let (mut session, _) = session();

        let product = mark_as_restocked(&mut session, "3", None).unwrap();
        assert_eq!(product.current_stock, 20);
        let last = session.inventory().movements().entries().last().unwrap().clone();
        assert_eq!(last.kind, MovementType::Restock);
        assert_eq!(last.quantity, 15);

        let product = mark_as_restocked(&mut session, "4", Some(0)).unwrap();
        assert_eq!(product.current_stock, 10);

        let err = mark_as_restocked(&mut session, "4", Some(-3)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(stock(&session, "4"), 10);
    }

    #[test]
    fn test_history_is_newest_first() {
        let (mut session, _) = session();
        select_product(&mut session, "2", true, 1).unwrap();
        let list = create_list(&mut session, "Nova").unwrap();
        cancel_list(&mut session, &list.id).unwrap();

        let history = restock_history(&session);
        assert_eq!(history[0].id, list.id);
        assert_eq!(get_list(&session, &list.id).unwrap().status, RestockStatus::Cancelled);
    }
}
