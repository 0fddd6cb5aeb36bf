//! Core costing logic for bundled sales documents.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Hosts hand over table snapshots and receive recomputed snapshots back.
//!
//! # Modules
//!
//! - `costing` - Bundle cost rollup, line margins and header totals
//! - `bundle` - Product bundle explosion into per-unit component rows
//! - `fulfillment` - Delivery BOM carry-forward and purchase order lines
//! - `catalog` - Item and bundle lookups supplied by the host

pub mod bundle;
pub mod catalog;
pub mod costing;
pub mod fulfillment;

pub use catalog::{BundleCatalog, CatalogItem, InMemoryCatalog, ItemCatalog};
pub use costing::{BundleCostEngine, CostingOutcome, CostingSnapshot};
