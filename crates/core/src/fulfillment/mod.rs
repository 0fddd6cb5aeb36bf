//! Delivery BOM carry-forward and component purchasing.

pub mod service;
pub mod types;

pub use service::FulfillmentService;
pub use types::{DeliveryBomRow, DeliveryNoteLine, PurchaseOrderLine};
