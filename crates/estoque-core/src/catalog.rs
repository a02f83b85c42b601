//! # Product Catalog Store
//!
//! Single in-memory source of truth for product records.
//!
//! ## Mutation Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Who Changes Stock?                                   │
//! │                                                                         │
//! │  RestockBook::create_list ──► adjust_stock(id, -qty)                    │
//! │  RestockBook::cancel_list ──► adjust_stock(id, +qty)                    │
//! │  mark_as_restocked ─────────► update_stock(id, min + n)                 │
//! │  manual edit (session) ─────► update_stock(id, n)                       │
//! │                                                                         │
//! │  Every path goes through update_stock, which REJECTS negative values.   │
//! │  A rejected change leaves the stored stock untouched.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are kept in insertion order, which is the order the product
//! grid shows them in.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Product, StockUnit};
use crate::validation::{
    validate_barcode, validate_product_name, validate_search_query, validate_stock_level,
};
use crate::MAX_ITEM_QUANTITY;

/// Form data for a product that does not exist yet.
///
/// ## Usage
/// ```rust
/// use estoque_core::catalog::NewProduct;
///
/// let draft = NewProduct {
///     name: "Óleo de Soja".into(),
///     barcode: "7891234567894".into(),
///     min_stock: 12,
///     ..NewProduct::default()
/// };
/// assert_eq!(draft.current_stock, 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub brand: String,
    /// Pre-filled by the barcode scanner or typed by hand.
    pub barcode: String,
    pub min_stock: i64,
    pub current_stock: i64,
    pub unit: StockUnit,
    pub expiry_date: Option<NaiveDate>,
    pub image: Option<String>,
}

/// In-memory product store.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from existing records (seed data, imports).
    ///
    /// Fails on duplicate ids or negative stock levels.
    pub fn from_products(products: Vec<Product>) -> CoreResult<Self> {
        let mut catalog = Self::new();
        for product in products {
            catalog.insert(product)?;
        }
        Ok(catalog)
    }

    /// Inserts a fully-formed product record.
    pub fn insert(&mut self, product: Product) -> CoreResult<&Product> {
        if self.contains(&product.id) {
            return Err(CoreError::DuplicateProduct(product.id));
        }
        validate_stock_level("minStock", product.min_stock)?;
        validate_stock_level("currentStock", product.current_stock)?;

        self.products.push(product);
        Ok(&self.products[self.products.len() - 1])
    }

    /// Validates a form draft and adds it with a fresh UUID.
    pub fn add_product(&mut self, draft: NewProduct) -> CoreResult<&Product> {
        validate_product_name(&draft.name)?;
        let barcode = validate_barcode(&draft.barcode)?;

        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: draft.name.trim().to_string(),
            category: draft.category.trim().to_string(),
            brand: draft.brand.trim().to_string(),
            barcode,
            min_stock: draft.min_stock,
            current_stock: draft.current_stock,
            unit: draft.unit,
            expiry_date: draft.expiry_date,
            image: draft.image.filter(|url| !url.trim().is_empty()),
        };

        self.insert(product)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Looks up a product by id, failing with `ProductNotFound`.
    pub fn require(&self, id: &str) -> CoreResult<&Product> {
        self.get(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Exact barcode match (after trimming the input).
    pub fn get_by_barcode(&self, barcode: &str) -> Option<&Product> {
        let barcode = barcode.trim();
        if barcode.is_empty() {
            return None;
        }
        self.products.iter().find(|p| p.barcode == barcode)
    }

    /// All products in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products strictly below their minimum.
    pub fn low_stock(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.is_low_stock())
    }

    /// Products at or above their minimum ("Outros Produtos").
    pub fn sufficient_stock(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| !p.is_low_stock())
    }

    /// Case-insensitive substring search over name, brand, category and
    /// barcode. An empty query matches everything.
    pub fn search(&self, query: &str) -> CoreResult<Vec<&Product>> {
        let query = validate_search_query(query)?.to_lowercase();

        Ok(self
            .products
            .iter()
            .filter(|p| {
                query.is_empty()
                    || p.name.to_lowercase().contains(&query)
                    || p.brand.to_lowercase().contains(&query)
                    || p.category.to_lowercase().contains(&query)
                    || p.barcode.contains(&query)
            })
            .collect())
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for product in &self.products {
            if !product.category.is_empty() && !seen.contains(&product.category.as_str()) {
                seen.push(&product.category);
            }
        }
        seen
    }

    /// Sum of `current_stock` across the catalog.
    pub fn total_stock(&self) -> i64 {
        self.products.iter().map(|p| p.current_stock).sum()
    }

    // =========================================================================
    // Mutators
    // =========================================================================

    /// Sets a product's stock to `new_quantity`.
    ///
    /// ## Policy
    /// Negative targets are rejected with `NegativeStock`; targets above
    /// `MAX_ITEM_QUANTITY` fail validation. Nothing is clamped.
    ///
    /// ## Returns
    /// The previous stock level.
    pub fn update_stock(&mut self, product_id: &str, new_quantity: i64) -> CoreResult<i64> {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        if new_quantity < 0 {
            return Err(CoreError::NegativeStock {
                product_id: product_id.to_string(),
                requested: new_quantity,
            });
        }
        validate_stock_level("currentStock", new_quantity)?;

        let previous = product.current_stock;
        product.current_stock = new_quantity;
        Ok(previous)
    }

    /// Applies `delta` to a product's stock under the same policy as
    /// [`update_stock`](Self::update_stock).
    ///
    /// ## Returns
    /// The new stock level.
    pub fn adjust_stock(&mut self, product_id: &str, delta: i64) -> CoreResult<i64> {
        let current = self.require(product_id)?.current_stock;
        let target = current
            .checked_add(delta)
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "currentStock".to_string(),
                min: 0,
                max: MAX_ITEM_QUANTITY,
            })?;
        self.update_stock(product_id, target)?;
        Ok(target)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn product(id: &str, name: &str, current: i64, min: i64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            category: "Grãos".to_string(),
            brand: "Grão Dourado".to_string(),
            barcode: format!("789123456789{}", id),
            min_stock: min,
            current_stock: current,
            unit: StockUnit::Unidade,
            expiry_date: None,
            image: None,
        }
    }

    pub(crate) fn sample_catalog() -> ProductCatalog {
        ProductCatalog::from_products(vec![
            product("1", "Leite Integral", 18, 20),
            product("2", "Arroz Branco", 25, 15),
            product("3", "Feijão Preto", 5, 15),
            product("4", "Café em Pó", 8, 10),
            product("5", "Óleo de Soja", 22, 12),
        ])
        .unwrap()
    }

    #[test]
    fn test_from_products_rejects_duplicates() {
        let result = ProductCatalog::from_products(vec![
            product("1", "Leite", 1, 1),
            product("1", "Leite de novo", 1, 1),
        ]);
        assert!(matches!(result, Err(CoreError::DuplicateProduct(id)) if id == "1"));
    }

    #[test]
    fn test_add_product_generates_id_and_trims() {
        let mut catalog = ProductCatalog::new();
        let product = catalog
            .add_product(NewProduct {
                name: "  Açúcar Refinado ".into(),
                barcode: " 7891000100103 ".into(),
                min_stock: 10,
                current_stock: 4,
                unit: StockUnit::Fardo,
                image: Some("   ".into()),
                ..NewProduct::default()
            })
            .unwrap()
            .clone();

        assert!(Uuid::parse_str(&product.id).is_ok());
        assert_eq!(product.name, "Açúcar Refinado");
        assert_eq!(product.barcode, "7891000100103");
        assert_eq!(product.image, None);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_add_product_rejects_blank_name_and_negative_stock() {
        let mut catalog = ProductCatalog::new();
        assert!(catalog.add_product(NewProduct::default()).is_err());

        let result = catalog.add_product(NewProduct {
            name: "Sal".into(),
            current_stock: -1,
            ..NewProduct::default()
        });
        assert!(matches!(result, Err(CoreError::Validation(_))));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_update_stock_rejects_negative_for_every_product() {
        let mut catalog = sample_catalog();
        let ids: Vec<String> = catalog.products().iter().map(|p| p.id.clone()).collect();

        for id in ids {
            let before = catalog.get(&id).unwrap().current_stock;
            for target in [-1, -5, i64::MIN] {
                let result = catalog.update_stock(&id, target);
                assert!(matches!(result, Err(CoreError::NegativeStock { .. })));
                assert_eq!(catalog.get(&id).unwrap().current_stock, before);
            }
        }
    }

    #[test]
    fn test_update_stock_rejects_values_above_limit() {
        let mut catalog = sample_catalog();

        assert_eq!(catalog.update_stock("1", MAX_ITEM_QUANTITY).unwrap(), 18);
        for target in [MAX_ITEM_QUANTITY + 1, i64::MAX] {
            let result = catalog.update_stock("2", target);
            assert!(matches!(
                result,
                Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
            ));
        }
        assert_eq!(catalog.get("2").unwrap().current_stock, 25);
        assert!(catalog.adjust_stock("1", 1).is_err());
        assert!(catalog.adjust_stock("1", i64::MAX).is_err());
        assert_eq!(catalog.get("1").unwrap().current_stock, MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_total_stock_stays_bounded_after_large_edits() {
        let mut catalog = sample_catalog();
        let _ = catalog.update_stock("1", i64::MAX);
        let _ = catalog.update_stock("2", i64::MAX);
        catalog.update_stock("3", MAX_ITEM_QUANTITY).unwrap();

        let bound = MAX_ITEM_QUANTITY * catalog.len() as i64;
        assert!(catalog.total_stock() <= bound);
    }

    #[test]
    fn test_update_stock_returns_previous() {
        let mut catalog = sample_catalog();
        assert_eq!(catalog.update_stock("3", 0).unwrap(), 5);
        assert_eq!(catalog.get("3").unwrap().current_stock, 0);
        assert!(matches!(
            catalog.update_stock("99", 1),
            Err(CoreError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_adjust_stock() {
        let mut catalog = sample_catalog();
        assert_eq!(catalog.adjust_stock("2", -5).unwrap(), 20);
        assert_eq!(catalog.adjust_stock("2", 3).unwrap(), 23);
        assert!(catalog.adjust_stock("2", -24).is_err());
        assert_eq!(catalog.get("2").unwrap().current_stock, 23);
    }

    #[test]
    fn test_low_stock_iff_strictly_below_minimum() {
        let mut catalog = sample_catalog();
        catalog.update_stock("2", 15).unwrap(); // exactly at minimum

        let low: Vec<&str> = catalog.low_stock().map(|p| p.id.as_str()).collect();
        assert_eq!(low, vec!["1", "3", "4"]);

        for product in catalog.products() {
            let in_view = catalog.low_stock().any(|p| p.id == product.id);
            assert_eq!(in_view, product.current_stock < product.min_stock);
        }
        assert_eq!(
            catalog.low_stock().count() + catalog.sufficient_stock().count(),
            catalog.len()
        );
    }

    #[test]
    fn test_search() {
        let catalog = sample_catalog();
        let hits = catalog.search("feijão").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "3");

        assert_eq!(catalog.search("GRÃO DOURADO").unwrap().len(), 5);
        assert_eq!(catalog.search("").unwrap().len(), 5);
        assert_eq!(catalog.search("7891234567893").unwrap()[0].id, "3");
    }

    #[test]
    fn test_get_by_barcode() {
        let catalog = sample_catalog();
        assert_eq!(catalog.get_by_barcode(" 7891234567894 ").unwrap().id, "4");
        assert!(catalog.get_by_barcode("").is_none());
    }

    #[test]
    fn test_categories_and_total() {
        let catalog = sample_catalog();
        assert_eq!(catalog.categories(), vec!["Grãos"]);
        assert_eq!(catalog.total_stock(), 18 + 25 + 5 + 8 + 22);
    }
}
