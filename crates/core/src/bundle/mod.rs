//! Product bundle explosion.
//!
//! Selecting a bundle on a sales line fills the component table with one row
//! per bundle item, quantities per ONE unit of the parent.

pub mod service;
pub mod types;

pub use service::BundleService;
pub use types::{BundleItem, ProductBundle};
