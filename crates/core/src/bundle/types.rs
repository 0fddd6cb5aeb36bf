//! Product bundle definitions.

use bundlecost_shared::ItemCode;
use bundlecost_shared::types::numeric::lenient;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named recipe of component items for one parent item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductBundle {
    /// Bundle name.
    pub name: String,
    /// Parent item the bundle builds.
    #[serde(alias = "new_item_code")]
    pub parent_item: ItemCode,
    /// Components needed for ONE unit of the parent.
    #[serde(default, deserialize_with = "lenient::rows")]
    pub items: Vec<BundleItem>,
}

/// One line of a product bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleItem {
    /// Component item.
    #[serde(default, deserialize_with = "lenient::item_code")]
    pub item_code: Option<ItemCode>,
    /// Quantity per ONE unit of the parent.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub qty: Decimal,
    /// Component description.
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    /// Component unit of measure.
    #[serde(default, deserialize_with = "lenient::text")]
    pub uom: String,
}

impl ProductBundle {
    /// Creates an empty bundle.
    #[must_use]
    pub fn new(name: impl Into<String>, parent_item: ItemCode) -> Self {
        Self {
            name: name.into(),
            parent_item,
            items: Vec::new(),
        }
    }

    /// Appends a component line.
    #[must_use]
    pub fn with_item(mut self, item_code: ItemCode, qty: Decimal) -> Self {
        self.items.push(BundleItem {
            item_code: Some(item_code),
            qty,
            ..BundleItem::default()
        });
        self
    }

    /// Component lines that can be built: a code and a positive quantity.
    pub fn usable_items(&self) -> impl Iterator<Item = (&ItemCode, &BundleItem)> {
        self.items.iter().filter_map(|item| match &item.item_code {
            Some(code) if item.qty > Decimal::ZERO => Some((code, item)),
            _ => None,
        })
    }
}
