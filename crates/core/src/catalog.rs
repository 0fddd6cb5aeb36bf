//! Item and bundle lookups supplied by the host.
//!
//! The costing crate never talks to a database. Hosts implement these traits
//! over whatever item master they have; `InMemoryCatalog` covers tests and
//! hosts that preload their data.

use std::collections::HashMap;

use bundlecost_shared::ItemCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::bundle::ProductBundle;

/// Read access to the item master.
pub trait ItemCatalog {
    /// Display name of an item.
    fn item_name(&self, code: &ItemCode) -> Option<String>;

    /// Stock unit of measure of an item.
    fn stock_uom(&self, code: &ItemCode) -> Option<String>;

    /// Rate of the most recent purchase.
    fn last_purchase_rate(&self, code: &ItemCode) -> Option<Decimal>;

    /// Stock valuation rate.
    fn valuation_rate(&self, code: &ItemCode) -> Option<Decimal>;

    /// Best known purchase cost: last purchase rate, else valuation rate.
    ///
    /// A zero rate counts as unknown.
    fn purchase_rate(&self, code: &ItemCode) -> Decimal {
        self.last_purchase_rate(code)
            .filter(|rate| !rate.is_zero())
            .or_else(|| self.valuation_rate(code).filter(|rate| !rate.is_zero()))
            .unwrap_or(Decimal::ZERO)
    }

    /// Item name, falling back to the code itself.
    fn display_name(&self, code: &ItemCode) -> String {
        self.item_name(code)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| code.to_string())
    }
}

/// Read access to product bundle definitions.
pub trait BundleCatalog {
    /// Looks up a product bundle by name.
    fn product_bundle(&self, name: &str) -> Option<ProductBundle>;
}

/// An item master record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Item code.
    pub code: ItemCode,
    /// Display name.
    pub item_name: Option<String>,
    /// Stock unit of measure.
    pub stock_uom: Option<String>,
    /// Rate of the most recent purchase.
    pub last_purchase_rate: Option<Decimal>,
    /// Stock valuation rate.
    pub valuation_rate: Option<Decimal>,
}

impl CatalogItem {
    /// Creates a record with only a code.
    #[must_use]
    pub fn new(code: ItemCode) -> Self {
        Self {
            code,
            item_name: None,
            stock_uom: None,
            last_purchase_rate: None,
            valuation_rate: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.item_name = Some(name.into());
        self
    }

    /// Sets the stock unit of measure.
    #[must_use]
    pub fn uom(mut self, uom: impl Into<String>) -> Self {
        self.stock_uom = Some(uom.into());
        self
    }

    /// Sets the purchase and valuation rates.
    #[must_use]
    pub fn rates(mut self, last_purchase: Option<Decimal>, valuation: Option<Decimal>) -> Self {
        self.last_purchase_rate = last_purchase;
        self.valuation_rate = valuation;
        self
    }
}

/// Catalog backed by hash maps.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    items: HashMap<ItemCode, CatalogItem>,
    bundles: HashMap<String, ProductBundle>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item, replacing any record with the same code.
    #[must_use]
    pub fn with_item(mut self, item: CatalogItem) -> Self {
        self.insert_item(item);
        self
    }

    /// Adds a bundle, replacing any bundle with the same name.
    #[must_use]
    pub fn with_bundle(mut self, bundle: ProductBundle) -> Self {
        self.insert_bundle(bundle);
        self
    }

    /// Inserts an item record.
    pub fn insert_item(&mut self, item: CatalogItem) {
        self.items.insert(item.code.clone(), item);
    }

    /// Inserts a bundle definition.
    pub fn insert_bundle(&mut self, bundle: ProductBundle) {
        self.bundles.insert(bundle.name.clone(), bundle);
    }
}

impl ItemCatalog for InMemoryCatalog {
    fn item_name(&self, code: &ItemCode) -> Option<String> {
        self.items.get(code).and_then(|item| item.item_name.clone())
    }

    fn stock_uom(&self, code: &ItemCode) -> Option<String> {
        self.items.get(code).and_then(|item| item.stock_uom.clone())
    }

    fn last_purchase_rate(&self, code: &ItemCode) -> Option<Decimal> {
        self.items.get(code).and_then(|item| item.last_purchase_rate)
    }

    fn valuation_rate(&self, code: &ItemCode) -> Option<Decimal> {
        self.items.get(code).and_then(|item| item.valuation_rate)
    }
}

impl BundleCatalog for InMemoryCatalog {
    fn product_bundle(&self, name: &str) -> Option<ProductBundle> {
        self.bundles.get(name.trim()).cloned()
    }
}
