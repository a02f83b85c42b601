//! # Product Commands
//!
//! Catalog reads, manual stock edits, product entry and barcode scanning.
//!
//! ## Product Entry
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "Novo produto" form                                                    │
//! │                                                                         │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │  Nome          [ Óleo de Soja          ]                       │    │
//! │  │  Código        [ 7891234567894         ] [📷 scan_barcode]     │    │
//! │  │  Estoque mín.  [ 12 ]   Estoque atual [ 22 ]                   │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  add_product(&mut session, draft) → Product (new UUID)                 │
//! │  notice: "Produto adicionado"                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use estoque_core::catalog::NewProduct;
use estoque_core::Product;
use estoque_sync::SyncTransport;
use tracing::{debug, info, warn};

use crate::error::{ApiError, ApiResult};
use crate::notify::Notice;
use crate::scanner::{BarcodeScanner, OverlayGuard, ScanResponse};
use crate::state::{Session, MANUAL_ADJUSTMENT_NOTE};

/// Every product, in catalog order.
pub fn list_products<T: SyncTransport>(session: &Session<T>) -> Vec<Product> {
    debug!("list_products command");
    session.inventory.catalog.products().to_vec()
}

/// Searches name, brand, category and barcode.
///
/// ## Arguments
/// * `query` - Case-insensitive; an empty query returns every product
pub fn search_products<T: SyncTransport>(session: &Session<T>, query: &str) -> ApiResult<Vec<Product>> {
    debug!(query = %query, "search_products command");
    let found = session.inventory.catalog.search(query)?;
    Ok(found.into_iter().cloned().collect())
}

pub fn get_product<T: SyncTransport>(session: &Session<T>, product_id: &str) -> ApiResult<Product> {
    debug!(product_id = %product_id, "get_product command");
    Ok(session.inventory.catalog.require(product_id)?.clone())
}

pub fn get_product_by_barcode<T: SyncTransport>(
    session: &Session<T>,
    barcode: &str,
) -> ApiResult<Product> {
    debug!(barcode = %barcode, "get_product_by_barcode command");
    session
        .inventory
        .catalog
        .get_by_barcode(barcode)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Product with barcode", barcode))
}

/// Products strictly below their minimum stock.
pub fn low_stock_products<T: SyncTransport>(session: &Session<T>) -> Vec<Product> {
    debug!("low_stock_products command");
    session.inventory.catalog.low_stock().cloned().collect()
}

/// Distinct categories for the filter dropdown.
pub fn list_categories<T: SyncTransport>(session: &Session<T>) -> Vec<String> {
    session
        .inventory
        .catalog
        .categories()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Sets a product's stock from the edit dialog.
///
/// A negative quantity is rejected and the stored stock is kept. A change is
/// logged as an entry or exit of the difference.
pub fn update_stock<T: SyncTransport>(
    session: &mut Session<T>,
    product_id: &str,
    new_quantity: i64,
) -> ApiResult<Product> {
    debug!(product_id = %product_id, new_quantity, "update_stock command");

    match session
        .inventory
        .set_stock(product_id, new_quantity, MANUAL_ADJUSTMENT_NOTE)
    {
        Ok(product) => {
            info!(product_id = %product_id, stock = product.current_stock, "Stock updated");
            Ok(product)
        }
        Err(err) => {
            warn!(product_id = %product_id, new_quantity, error = %err, "Stock update rejected");
            Err(session.fail("Erro ao atualizar estoque", err))
        }
    }
}

/// Registers a new product.
pub fn add_product<T: SyncTransport>(session: &mut Session<T>, draft: NewProduct) -> ApiResult<Product> {
    debug!(name = %draft.name, barcode = %draft.barcode, "add_product command");

    let product = match session.inventory.catalog.add_product(draft) {
        Ok(product) => product.clone(),
        Err(err) => return Err(session.fail("Erro ao adicionar produto", err)),
    };

    info!(product_id = %product.id, name = %product.name, "Product added");
    session.notify(
        Notice::success("Produto adicionado")
            .with_description(format!("{} foi adicionado com sucesso.", product.name)),
    );
    Ok(product)
}

/// Runs one barcode scan for the product entry form.
///
/// ## Behavior
/// - The overlay is raised before scanning and lowered on every path
/// - `Content`: the raw code is written to `draft.barcode` and returned
/// - `NoContent`: returns `None`, draft untouched
/// - `PermissionDenied` / `Failed`: `ScannerError`, draft untouched
pub async fn scan_barcode<T: SyncTransport, S: BarcodeScanner>(
    session: &Session<T>,
    scanner: &S,
    draft: &mut NewProduct,
) -> ApiResult<Option<String>> {
    debug!("scan_barcode command");

    session.notify(
        Notice::info("Scanner de código de barras")
            .with_description("Posicione o código de barras em frente à câmera."),
    );

    let response = {
        let _overlay = OverlayGuard::raise(scanner);
        scanner.start_scan().await
    };

    match response {
        ScanResponse::Content(code) => {
            info!(code = %code, "Barcode scanned");
            session.notify(
                Notice::success("Código de barras lido")
                    .with_description(format!("Código {} detectado com sucesso.", code)),
            );
            draft.barcode = code.clone();
            Ok(Some(code))
        }
        ScanResponse::NoContent => {
            debug!("Scan closed without content");
            Ok(None)
        }
        ScanResponse::PermissionDenied => {
            warn!("Camera permission denied");
            session.notify(
                Notice::destructive("Permissão negada")
                    .with_description("Você precisa permitir o acesso à câmera para usar o scanner."),
            );
            Err(ApiError::scanner("Camera permission denied"))
        }
        ScanResponse::Failed(reason) => {
            warn!(reason = %reason, "Scan failed");
            session.notify(
                Notice::destructive("Erro no scanner").with_description(
                    "Ocorreu um erro ao tentar escanear. Por favor, tente novamente.",
                ),
            );
            Err(ApiError::scanner(reason))
        }
    }
}
