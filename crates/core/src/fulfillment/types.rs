//! Fulfillment document rows.

use bundlecost_shared::ItemCode;
use bundlecost_shared::types::numeric::lenient;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A component line carried from quotation to sales order to delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryBomRow {
    /// Component item.
    pub item: ItemCode,
    /// Component display name.
    #[serde(default, deserialize_with = "lenient::text")]
    pub item_name: String,
    /// Component description.
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    /// Component quantity.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub qty: Decimal,
    /// Parent product the component was exploded from.
    #[serde(
        default,
        alias = "custom_parent_product",
        deserialize_with = "lenient::item_code"
    )]
    pub parent_product: Option<ItemCode>,
}

/// A delivery note line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryNoteLine {
    /// Delivered item.
    pub item_code: ItemCode,
    /// Item display name.
    #[serde(default, deserialize_with = "lenient::text")]
    pub item_name: String,
    /// Item description.
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    /// Unit of measure.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub uom: Option<String>,
    /// Delivered quantity.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub qty: Decimal,
    /// Unit sell price.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub rate: Decimal,
    /// Discount percentage.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub discount_percentage: Decimal,
    /// Discount amount.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub discount_amount: Decimal,
    /// Source warehouse.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub warehouse: Option<String>,
    /// Sales order this line fulfils.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub against_sales_order: Option<String>,
    /// Sales order line this line fulfils.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub so_detail: Option<String>,
}

/// A purchase order line for bundle components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    /// Purchased item.
    pub item_code: ItemCode,
    /// Item display name.
    pub item_name: String,
    /// Stock unit of measure.
    pub uom: Option<String>,
    /// Quantity to order.
    pub qty: Decimal,
    /// Expected purchase rate.
    pub rate: Decimal,
    /// Quantity times rate.
    pub amount: Decimal,
}
