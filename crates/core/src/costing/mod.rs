//! Bundle cost rollup and margin computation.
//!
//! The pipeline is pure: a host hands over the full table state and gets the
//! full recomputed state back.
//!
//! 1. Component row totals are recomputed from quantity and unit cost
//! 2. Row totals are aggregated per parent item
//! 3. Costs are applied to parent lines (main lines from the bundle, others manual)
//! 4. Line margins are derived on sell price
//! 5. Header totals are derived with margin on cost

pub(crate) mod arith;
pub mod engine;
pub mod error;
pub mod snapshot;
pub mod types;

#[cfg(test)]
mod tests;

pub use engine::{AggregatedCosts, BundleCostEngine};
pub use error::CostingError;
pub use types::{BundleComponentRow, CostingOutcome, CostingSnapshot, HeaderTotals, ParentLine};
