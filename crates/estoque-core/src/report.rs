//! # Reports and Dashboard
//!
//! Builds the typed rows behind the reports screen and the dashboard
//! counters. Rendering and export formats live outside this crate.
//!
//! ## Report Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ReportOptions ──► date range ──► category ──► rows                     │
//! │  (type, category,   explicit or    movements     Vec<Movement>          │
//! │   filters)          type window    expiring      Vec<ExpiringRow>       │
//! │                                    lowStock      Vec<LowStockRow>       │
//! │                                    topRestocked  Vec<TopRestockedRow>   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::ProductCatalog;
use crate::error::{CoreResult, ValidationError};
use crate::movement::MovementLog;
use crate::types::{Batch, BatchStatus, Movement, MovementType, Product, RestockList, RestockStatus};

// =============================================================================
// Options
// =============================================================================

/// Reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum ReportType {
    Daily,
    Weekly,
    Monthly,
}

impl ReportType {
    pub fn label(&self) -> &'static str {
        match self {
            ReportType::Daily => "Diário",
            ReportType::Weekly => "Semanal",
            ReportType::Monthly => "Mensal",
        }
    }

    /// Number of calendar days the period covers.
    pub fn days(&self) -> i64 {
        match self {
            ReportType::Daily => 1,
            ReportType::Weekly => 7,
            ReportType::Monthly => 30,
        }
    }

    /// Default inclusive window ending on `today`.
    pub fn window(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        (today - Duration::days(self.days() - 1), today)
    }
}

/// What a report is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum ReportCategory {
    Movements,
    Expiring,
    LowStock,
    TopRestocked,
}

impl ReportCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ReportCategory::Movements => "Movimentações",
            ReportCategory::Expiring => "Produtos Vencendo",
            ReportCategory::LowStock => "Estoque Baixo",
            ReportCategory::TopRestocked => "Top Repostos",
        }
    }
}

/// Parameters of a report request. Empty filter lists include everything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReportOptions {
    #[serde(rename = "type")]
    pub report_type: ReportType,
    pub category: ReportCategory,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub include_products: Vec<String>,
    #[serde(default)]
    pub include_users: Vec<String>,
    #[serde(default)]
    pub include_movement_types: Vec<MovementType>,
}

impl ReportOptions {
    pub fn new(report_type: ReportType, category: ReportCategory) -> Self {
        ReportOptions {
            report_type,
            category,
            start_date: None,
            end_date: None,
            include_products: Vec::new(),
            include_users: Vec::new(),
            include_movement_types: Vec::new(),
        }
    }

    /// Inclusive date range: explicit dates win, missing ends come from the
    /// report type's window.
    pub fn date_range(&self, today: NaiveDate) -> CoreResult<(NaiveDate, NaiveDate)> {
        let end = self.end_date.unwrap_or(today);
        let (window_start, _) = self.report_type.window(end);
        let start = self.start_date.unwrap_or(window_start);

        if start > end {
            return Err(ValidationError::InvalidDateRange { start, end }.into());
        }
        Ok((start, end))
    }

    fn includes_product(&self, product_id: &str) -> bool {
        self.include_products.is_empty() || self.include_products.iter().any(|p| p == product_id)
    }

    fn includes_movement(&self, movement: &Movement) -> bool {
        if !self.includes_product(&movement.product_id) {
            return false;
        }
        if !self.include_movement_types.is_empty()
            && !self.include_movement_types.contains(&movement.kind)
        {
            return false;
        }
        if !self.include_users.is_empty() {
            return match &movement.user_id {
                Some(user) => self.include_users.contains(user),
                None => false,
            };
        }
        true
    }
}

// =============================================================================
// Criticality
// =============================================================================

/// How far below its minimum a low-stock product is.
///
/// ## Bands (current / min)
/// ```text
///   0%  – 30%   → Critical
///   31% – 60%   → Warning
///   61% and up  → Attention   (anything still below the minimum)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum StockCriticality {
    Critical,
    Warning,
    Attention,
}

impl StockCriticality {
    /// Band of a product, `None` when it is not low on stock.
    pub fn of(product: &Product) -> Option<Self> {
        if !product.is_low_stock() {
            return None;
        }
        Some(Self::from_percentage(stock_percentage(product)))
    }

    pub fn from_percentage(percentage: i64) -> Self {
        match percentage {
            i64::MIN..=30 => StockCriticality::Critical,
            31..=60 => StockCriticality::Warning,
            _ => StockCriticality::Attention,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockCriticality::Critical => "Crítico",
            StockCriticality::Warning => "Alerta",
            StockCriticality::Attention => "Atenção",
        }
    }
}

/// `current / min` as a whole percentage, rounded down.
fn stock_percentage(product: &Product) -> i64 {
    if product.min_stock <= 0 {
        return 100;
    }
    product.current_stock * 100 / product.min_stock
}

// =============================================================================
// Rows
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExpiringRow {
    pub batch_id: String,
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub expiry_date: NaiveDate,
    /// Negative once expired.
    pub days_until_expiry: i64,
    pub location: String,
    pub status: BatchStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LowStockRow {
    pub product_id: String,
    pub name: String,
    pub current_stock: i64,
    pub min_stock: i64,
    pub shortfall: i64,
    pub percentage: i64,
    pub criticality: StockCriticality,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TopRestockedRow {
    pub product_id: String,
    pub name: String,
    pub total_quantity: i64,
    /// Completed lists the product appeared in.
    pub lists: usize,
}

/// Rows of a report, one shape per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "category", content = "rows", rename_all = "camelCase")]
pub enum ReportRows {
    Movements(Vec<Movement>),
    Expiring(Vec<ExpiringRow>),
    LowStock(Vec<LowStockRow>),
    TopRestocked(Vec<TopRestockedRow>),
}

impl ReportRows {
    pub fn len(&self) -> usize {
        match self {
            ReportRows::Movements(rows) => rows.len(),
            ReportRows::Expiring(rows) => rows.len(),
            ReportRows::LowStock(rows) => rows.len(),
            ReportRows::TopRestocked(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// e.g. "Estoque Baixo - Semanal"
    pub title: String,
    #[serde(rename = "type")]
    pub report_type: ReportType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub generated_on: NaiveDate,
    /// Serialized as `{ "category": ..., "rows": [...] }`.
    pub rows: ReportRows,
}

/// Everything a report reads from.
#[derive(Debug, Clone, Copy)]
pub struct ReportSources<'a> {
    pub catalog: &'a ProductCatalog,
    pub batches: &'a [Batch],
    pub movements: &'a MovementLog,
    pub restock_history: &'a [RestockList],
    pub warning_days: i64,
}

// =============================================================================
// Builder
// =============================================================================

/// Builds the report described by `options` as of `today`.
///
/// ## Categories
/// - movements: entries dated within the range, newest first
/// - expiring: batches that are expired or expire within `warning_days`,
///   soonest first (not bound to the range; expiry looks forward)
/// - lowStock: products strictly below their minimum, most critical first
/// - topRestocked: completed lists created within the range, summed per
///   product, largest first
pub fn build_report(
    options: &ReportOptions,
    sources: &ReportSources<'_>,
    today: NaiveDate,
) -> CoreResult<Report> {
    let (start, end) = options.date_range(today)?;

    let rows = match options.category {
        ReportCategory::Movements => movement_rows(options, sources.movements, start, end),
        ReportCategory::Expiring => expiring_rows(options, sources, today),
        ReportCategory::LowStock => low_stock_rows(options, sources.catalog),
        ReportCategory::TopRestocked => top_restocked_rows(options, sources.restock_history, start, end),
    };

    Ok(Report {
        title: format!("{} - {}", options.category.label(), options.report_type.label()),
        report_type: options.report_type,
        start_date: start,
        end_date: end,
        generated_on: today,
        rows,
    })
}

fn movement_rows(
    options: &ReportOptions,
    movements: &MovementLog,
    start: NaiveDate,
    end: NaiveDate,
) -> ReportRows {
    let mut rows: Vec<Movement> = movements
        .between(start, end)
        .filter(|m| options.includes_movement(m))
        .cloned()
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    ReportRows::Movements(rows)
}

fn expiring_rows(options: &ReportOptions, sources: &ReportSources<'_>, today: NaiveDate) -> ReportRows {
    let mut rows: Vec<ExpiringRow> = sources
        .batches
        .iter()
        .filter(|b| options.includes_product(&b.product_id))
        .filter(|b| b.days_until_expiry(today) <= sources.warning_days)
        .map(|b| ExpiringRow {
            batch_id: b.id.clone(),
            product_id: b.product_id.clone(),
            product_name: sources
                .catalog
                .get(&b.product_id)
                .map(|p| p.name.clone())
                .unwrap_or_default(),
            quantity: b.quantity,
            expiry_date: b.expiry_date,
            days_until_expiry: b.days_until_expiry(today),
            location: b.location.clone(),
            status: crate::batch::batch_status(b.expiry_date, today, sources.warning_days),
        })
        .collect();
    rows.sort_by(|a, b| a.expiry_date.cmp(&b.expiry_date).then_with(|| a.batch_id.cmp(&b.batch_id)));
    ReportRows::Expiring(rows)
}

fn low_stock_rows(options: &ReportOptions, catalog: &ProductCatalog) -> ReportRows {
    let mut rows: Vec<LowStockRow> = catalog
        .low_stock()
        .filter(|p| options.includes_product(&p.id))
        .filter_map(|p| {
            let criticality = StockCriticality::of(p)?;
            Some(LowStockRow {
                product_id: p.id.clone(),
                name: p.name.clone(),
                current_stock: p.current_stock,
                min_stock: p.min_stock,
                shortfall: p.shortfall(),
                percentage: stock_percentage(p),
                criticality,
            })
        })
        .collect();
    rows.sort_by(|a, b| a.percentage.cmp(&b.percentage).then_with(|| a.product_id.cmp(&b.product_id)));
    ReportRows::LowStock(rows)
}

fn top_restocked_rows(
    options: &ReportOptions,
    history: &[RestockList],
    start: NaiveDate,
    end: NaiveDate,
) -> ReportRows {
    let mut totals: HashMap<&str, TopRestockedRow> = HashMap::new();

    let completed = history.iter().filter(|l| {
        let day = l.created_at.date_naive();
        l.status == RestockStatus::Completed && day >= start && day <= end
    });

    for list in completed {
        for item in &list.items {
            if !options.includes_product(&item.product_id) {
                continue;
            }
            let row = totals
                .entry(item.product_id.as_str())
                .or_insert_with(|| TopRestockedRow {
                    product_id: item.product_id.clone(),
                    name: item.name.clone(),
                    total_quantity: 0,
                    lists: 0,
                });
            row.total_quantity += item.quantity;
            row.lists += 1;
        }
    }

    let mut rows: Vec<TopRestockedRow> = totals.into_values().collect();
    rows.sort_by(|a, b| {
        b.total_quantity
            .cmp(&a.total_quantity)
            .then_with(|| a.product_id.cmp(&b.product_id))
    });
    ReportRows::TopRestocked(rows)
}

// =============================================================================
// Dashboard
// =============================================================================

/// Counters shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total_products: usize,
    pub low_stock_products: usize,
    pub expiring_batches: usize,
    pub expired_batches: usize,
    pub total_stock: i64,
}

impl InventoryStats {
    /// Uses the batches' stored status; refresh them first when the date
    /// may have rolled over.
    pub fn compute(catalog: &ProductCatalog, batches: &[Batch]) -> Self {
        InventoryStats {
            total_products: catalog.len(),
            low_stock_products: catalog.low_stock().count(),
            expiring_batches: batches.iter().filter(|b| b.status == BatchStatus::Expiring).count(),
            expired_batches: batches.iter().filter(|b| b.status == BatchStatus::Expired).count(),
            total_stock: catalog.total_stock(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
