//! # Seed Data
//!
//! Demo inventory of a small grocery store. Batch and movement dates are
//! relative to the day the session starts so expiry states stay meaningful.
//!
//! ```text
//!   id  product          min  current  level
//!   1   Leite Integral    20       18  low
//!   2   Arroz Branco      15       25  ok
//!   3   Feijão Preto      15        5  low (critical)
//!   4   Café em Pó        10        8  low
//!   5   Óleo de Soja      12       22  ok
//! ```

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use estoque_core::batch::batch_status;
use estoque_core::movement::MovementLog;
use estoque_core::restock::RestockBook;
use estoque_core::{
    Batch, CoreResult, Movement, MovementType, Product, ProductCatalog, RestockList,
    RestockListItem, RestockStatus, StockUnit,
};
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::notify::Notifier;
use crate::state::{InventoryState, Session};

fn product(
    id: &str,
    name: &str,
    category: &str,
    brand: &str,
    barcode: &str,
    min_stock: i64,
    current_stock: i64,
    photo: &str,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        brand: brand.to_string(),
        barcode: barcode.to_string(),
        min_stock,
        current_stock,
        unit: StockUnit::Unidade,
        expiry_date: None,
        image: Some(format!(
            "https://images.unsplash.com/photo-{}?auto=format&fit=crop&q=80",
            photo
        )),
    }
}

pub fn sample_products() -> Vec<Product> {
    vec![
        product("1", "Leite Integral", "Laticínios", "Fazenda Feliz", "7891234567890", 20, 18, "1563636619-e9143da7973b"),
        product("2", "Arroz Branco", "Grãos", "Grão Dourado", "7891234567891", 15, 25, "1586201375761-83865001e31c"),
        product("3", "Feijão Preto", "Grãos", "Grão Dourado", "7891234567892", 15, 5, "1551462147-37885acc36f1"),
        product("4", "Café em Pó", "Bebidas", "Café Brasil", "7891234567893", 10, 8, "1559056199-641a0ac8b55e"),
        product("5", "Óleo de Soja", "Óleos", "GotaDOuro", "7891234567894", 12, 22, "1620574387735-3624a33a1ece"),
    ]
}

/// Seven batches: one expired, two inside the warning window, the rest fine.
pub fn sample_batches(today: NaiveDate, warning_days: i64) -> Vec<Batch> {
    // (id, product, quantity, expiry offset, entry offset, location)
    let rows: [(&str, &str, i64, i64, i64, &str); 7] = [
        ("1", "1", 10, 5, -25, "A1"),
        ("2", "1", 8, 45, -5, "A2"),
        ("3", "2", 25, 180, -15, "B3"),
        ("4", "3", 5, 90, -30, "B1"),
        ("5", "4", 3, -5, -45, "C2"),
        ("6", "4", 5, 20, -10, "C3"),
        ("7", "5", 22, 365, -7, "D1"),
    ];

    rows.iter()
        .map(|&(id, product_id, quantity, expiry, entry, location)| {
            let expiry_date = today + Duration::days(expiry);
            Batch {
                id: id.to_string(),
                product_id: product_id.to_string(),
                quantity,
                expiry_date,
                entry_date: today + Duration::days(entry),
                location: location.to_string(),
                status: batch_status(expiry_date, today, warning_days),
            }
        })
        .collect()
}

pub fn sample_movements(now: DateTime<Utc>) -> Vec<Movement> {
    // (id, product, batch, kind, quantity, days ago, notes)
    let rows: [(&str, &str, &str, MovementType, i64, i64, Option<&str>); 5] = [
        ("1", "1", "1", MovementType::Entry, 10, 25, Some("Entrega mensal")),
        ("2", "1", "2", MovementType::Entry, 8, 5, Some("Entrega de emergência")),
        ("3", "2", "3", MovementType::Entry, 25, 15, None),
        ("4", "4", "5", MovementType::Loss, 2, 2, Some("Produto danificado")),
        ("5", "3", "4", MovementType::Exit, 10, 1, Some("Reposição na prateleira")),
    ];

    rows.iter()
        .map(|&(id, product_id, batch_id, kind, quantity, days_ago, notes)| Movement {
            id: id.to_string(),
            product_id: product_id.to_string(),
            batch_id: Some(batch_id.to_string()),
            kind,
            quantity,
            date: now - Duration::days(days_ago),
            notes: notes.map(str::to_string),
            user_id: None,
        })
        .collect()
}

fn history_item(product_id: &str, name: &str, quantity: i64) -> RestockListItem {
    RestockListItem {
        product_id: product_id.to_string(),
        name: name.to_string(),
        quantity,
    }
}

/// Two closed lists from April 2025.
pub fn sample_history() -> Vec<RestockList> {
    let mut history = Vec::new();

    if let Some(created_at) = Utc.with_ymd_and_hms(2025, 4, 1, 10, 30, 0).single() {
        history.push(RestockList {
            id: "hist_1".to_string(),
            name: "Reposição Semanal".to_string(),
            items: vec![
                history_item("1", "Leite Integral", 5),
                history_item("2", "Arroz Branco", 7),
            ],
            created_at,
            status: RestockStatus::Completed,
        });
    }
    if let Some(created_at) = Utc.with_ymd_and_hms(2025, 4, 5, 9, 15, 0).single() {
        history.push(RestockList {
            id: "hist_2".to_string(),
            name: "Reposição Prioridades".to_string(),
            items: vec![
                history_item("3", "Feijão Preto", 2),
                history_item("4", "Café em Pó", 3),
            ],
            created_at,
            status: RestockStatus::Cancelled,
        });
    }

    history
}

fn seeded_parts(config: &AppConfig) -> CoreResult<(InventoryState, RestockBook)> {
    let now = Utc::now();
    let today = now.date_naive();

    let catalog = ProductCatalog::from_products(sample_products())?;
    let batches = sample_batches(today, config.restock.expiry_warning_days);
    let movements = MovementLog::from_movements(sample_movements(now));
    let book = RestockBook::with_default_name(config.restock.default_list_name.clone())
        .with_history(sample_history())?;

    Ok((InventoryState::from_parts(catalog, batches, movements), book))
}

/// A session preloaded with the demo inventory and restock history.
pub fn seeded_session(config: AppConfig, notifier: Arc<dyn Notifier>) -> Session {
    let parts = seeded_parts(&config);
    let session = Session::new(config, notifier);

    match parts {
        Ok((inventory, book)) => {
            debug!(products = inventory.catalog().len(), "Seeded demo inventory");
            session.with_inventory(inventory).with_restock_book(book)
        }
        Err(err) => {
            warn!(error = %err, "Seed data rejected, starting empty");
            session
        }
    }
}
