//! Costing snapshot types.
//!
//! Field aliases accept the host document's own column names so a form
//! snapshot can be decoded as-is. Every numeric field is decoded leniently.

use bundlecost_shared::ItemCode;
use bundlecost_shared::types::numeric::lenient;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::arith;

/// A sales line item whose cost may be rolled up from bundle components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentLine {
    /// Item sold on this line. Lines without a code are not costed.
    #[serde(default, deserialize_with = "lenient::item_code")]
    pub item_code: Option<ItemCode>,
    /// Quantity sold.
    #[serde(default, alias = "qty", deserialize_with = "lenient::decimal")]
    pub quantity: Decimal,
    /// Unit sell price.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub rate: Decimal,
    /// Main lines always take their cost from the bundle.
    #[serde(default, alias = "custom_main", deserialize_with = "lenient::flag")]
    pub is_main: bool,
    /// Manually entered unit cost, used only on non-main lines.
    #[serde(
        default,
        alias = "custom_purchase_rate",
        deserialize_with = "lenient::decimal"
    )]
    pub manual_unit_cost: Decimal,
    /// Product bundle selected for this line, if any.
    #[serde(
        default,
        alias = "custom_product_bundle",
        deserialize_with = "lenient::optional_text"
    )]
    pub bundle: Option<String>,
    /// Effective unit cost (derived).
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub unit_cost: Decimal,
    /// Quantity times effective unit cost (derived).
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub total_cost: Decimal,
    /// Margin on sell price, in percent (derived).
    #[serde(default, alias = "custom_margin", deserialize_with = "lenient::decimal")]
    pub margin_pct: Decimal,
    /// Quantity times rate (derived).
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub amount: Decimal,
}

impl ParentLine {
    /// Creates a line with no derived figures.
    #[must_use]
    pub fn new(item_code: Option<ItemCode>, quantity: Decimal, rate: Decimal) -> Self {
        Self {
            item_code,
            quantity,
            rate,
            ..Self::default()
        }
    }

    /// Marks the line as a main (bundle-costed) line.
    #[must_use]
    pub fn main(mut self) -> Self {
        self.is_main = true;
        self
    }

    /// Sets the manually entered unit cost.
    #[must_use]
    pub fn with_manual_cost(mut self, cost: Decimal) -> Self {
        self.manual_unit_cost = cost;
        self
    }

    /// Selects a product bundle for the line.
    #[must_use]
    pub fn with_bundle(mut self, bundle: impl Into<String>) -> Self {
        self.bundle = Some(bundle.into());
        self
    }

    /// Whether the host should let the user edit the unit cost.
    #[must_use]
    pub const fn is_cost_editable(&self) -> bool {
        !self.is_main
    }
}

/// One component needed to build ONE unit of a parent item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleComponentRow {
    /// Parent item this component belongs to.
    #[serde(
        default,
        alias = "custom_product",
        deserialize_with = "lenient::item_code"
    )]
    pub parent_item_code: Option<ItemCode>,
    /// Component item.
    #[serde(default, deserialize_with = "lenient::item_code")]
    pub item_code: Option<ItemCode>,
    /// Component description.
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    /// Component unit of measure.
    #[serde(default, deserialize_with = "lenient::text")]
    pub uom: String,
    /// Quantity per ONE unit of the parent.
    #[serde(default, alias = "qty", deserialize_with = "lenient::decimal")]
    pub quantity_per_unit: Decimal,
    /// Component unit cost.
    #[serde(default, alias = "custom_cost", deserialize_with = "lenient::decimal")]
    pub unit_cost: Decimal,
    /// Quantity per unit times unit cost (derived).
    #[serde(
        default,
        alias = "custom_total_cost",
        deserialize_with = "lenient::decimal"
    )]
    pub row_total: Decimal,
}

impl BundleComponentRow {
    /// Creates a component row for a parent item.
    #[must_use]
    pub fn new(parent: ItemCode, quantity_per_unit: Decimal, unit_cost: Decimal) -> Self {
        Self {
            parent_item_code: Some(parent),
            quantity_per_unit,
            unit_cost,
            ..Self::default()
        }
        .normalized()
    }

    /// Sets the component item.
    #[must_use]
    pub fn with_item(mut self, item_code: ItemCode) -> Self {
        self.item_code = Some(item_code);
        self
    }

    /// Row total computed from the current inputs.
    #[must_use]
    pub fn computed_total(&self) -> Decimal {
        arith::product(self.quantity_per_unit, self.unit_cost)
    }

    /// Returns the row with `row_total` recomputed from its inputs.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.row_total = self.computed_total();
        self
    }
}

/// Document-level cost figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderTotals {
    /// Sum of line costs plus overhead.
    pub total_cost: Decimal,
    /// Total sell minus total cost.
    pub profit: Decimal,
    /// Profit relative to total cost, in percent.
    pub margin_pct: Decimal,
}

/// Full table state handed over by the host for one recomputation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostingSnapshot {
    /// Sales lines.
    #[serde(default, deserialize_with = "lenient::rows")]
    pub items: Vec<ParentLine>,
    /// Bundle component rows.
    #[serde(
        default,
        alias = "custom_product_bundle",
        deserialize_with = "lenient::rows"
    )]
    pub components: Vec<BundleComponentRow>,
    /// Document overhead added to total cost.
    #[serde(
        default,
        alias = "custom_overhead",
        deserialize_with = "lenient::decimal"
    )]
    pub overhead: Decimal,
    /// Document total sell price.
    #[serde(default, alias = "total", deserialize_with = "lenient::decimal")]
    pub total_sell: Decimal,
}

/// Result of one recomputation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostingOutcome {
    /// Sales lines with derived figures filled in.
    pub items: Vec<ParentLine>,
    /// Component rows with `row_total` recomputed.
    pub components: Vec<BundleComponentRow>,
    /// Header totals.
    pub totals: HeaderTotals,
}

impl CostingOutcome {
    /// Turns the outcome back into a snapshot with the same scalars.
    ///
    /// Useful for hosts that keep editing after a recompute.
    #[must_use]
    pub fn into_snapshot(self, overhead: Decimal, total_sell: Decimal) -> CostingSnapshot {
        CostingSnapshot {
            items: self.items,
            components: self.components,
            overhead,
            total_sell,
        }
    }
}
