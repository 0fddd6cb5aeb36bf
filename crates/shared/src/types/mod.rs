//! Common types used across the costing crates.

pub mod item_code;
pub mod numeric;

pub use item_code::ItemCode;
pub use numeric::{cint, flag, flt, flt_str};
