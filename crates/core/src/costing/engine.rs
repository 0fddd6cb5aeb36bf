//! Bundle cost rollup engine.

use std::collections::BTreeMap;

use bundlecost_shared::{CostingConfig, ItemCode};
use rust_decimal::Decimal;
use tracing::debug;

use super::arith;
use super::types::{BundleComponentRow, CostingOutcome, CostingSnapshot, HeaderTotals, ParentLine};

/// Per-unit bundle cost keyed by parent item code.
pub type AggregatedCosts = BTreeMap<ItemCode, Decimal>;

/// Stateless engine computing bundle rollups, line margins and header totals.
///
/// The engine never fails: malformed figures have already been coerced to
/// zero when the snapshot was decoded, and arithmetic overflow degrades to
/// zero as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleCostEngine {
    percent_decimal_places: u32,
}

impl BundleCostEngine {
    /// Creates an engine rounding percentages to `percent_decimal_places`.
    #[must_use]
    pub const fn new(percent_decimal_places: u32) -> Self {
        Self {
            percent_decimal_places,
        }
    }

    /// Creates an engine from the costing configuration section.
    #[must_use]
    pub const fn from_config(config: &CostingConfig) -> Self {
        Self::new(config.percent_decimal_places)
    }

    /// Sums component row totals per parent item.
    ///
    /// Rows without a parent item code are skipped. Parents with no rows are
    /// absent from the result.
    #[must_use]
    pub fn aggregate_component_costs(components: &[BundleComponentRow]) -> AggregatedCosts {
        let mut per_parent: BTreeMap<ItemCode, Vec<Decimal>> = BTreeMap::new();

        for row in components {
            let Some(parent) = &row.parent_item_code else {
                continue;
            };
            per_parent
                .entry(parent.clone())
                .or_default()
                .push(row.computed_total());
        }

        per_parent
            .into_iter()
            .map(|(parent, totals)| (parent, arith::total(totals)))
            .collect()
    }

    /// Sets effective unit cost, total cost and amount on every line.
    ///
    /// Main lines take the aggregated bundle cost (zero when the item has no
    /// rows). Other lines keep their manual cost, even when bundle rows exist
    /// for the same item. Lines without an item code are not costed.
    #[must_use]
    pub fn apply_costs(parents: &[ParentLine], aggregated: &AggregatedCosts) -> Vec<ParentLine> {
        parents
            .iter()
            .map(|line| {
                let mut line = line.clone();
                line.unit_cost = match &line.item_code {
                    None => Decimal::ZERO,
                    Some(code) if line.is_main => {
                        aggregated.get(code).copied().unwrap_or(Decimal::ZERO)
                    }
                    Some(_) => line.manual_unit_cost,
                };
                line.total_cost = arith::product(line.quantity, line.unit_cost);
                line.amount = arith::product(line.quantity, line.rate);
                line
            })
            .collect()
    }

    /// Line margin on sell price: `(rate - unit_cost) / rate * 100`.
    ///
    /// Zero when the rate is not positive.
    #[must_use]
    pub fn compute_margin(&self, parent: &ParentLine) -> Decimal {
        if parent.item_code.is_none() {
            return Decimal::ZERO;
        }
        arith::percent(
            arith::difference(parent.rate, parent.unit_cost),
            parent.rate,
            self.percent_decimal_places,
        )
    }

    /// Header totals with margin on cost: `profit / total_cost * 100`.
    #[must_use]
    pub fn compute_header_totals(
        &self,
        parents: &[ParentLine],
        overhead: Decimal,
        total_sell: Decimal,
    ) -> HeaderTotals {
        let line_costs = arith::total(parents.iter().map(|line| line.total_cost));
        let total_cost = arith::sum(line_costs, overhead);
        let profit = arith::difference(total_sell, total_cost);
        let margin_pct = arith::percent(profit, total_cost, self.percent_decimal_places);

        HeaderTotals {
            total_cost,
            profit,
            margin_pct,
        }
    }

    /// Runs the full rollup over a snapshot.
    ///
    /// Recomputes row totals, aggregates them per parent, applies costs,
    /// derives line margins and header totals. Running it again on its own
    /// output yields the same result.
    #[must_use]
    pub fn recompute(&self, snapshot: &CostingSnapshot) -> CostingOutcome {
        debug!(
            items = snapshot.items.len(),
            components = snapshot.components.len(),
            "recomputing bundle costs"
        );

        let components: Vec<BundleComponentRow> = snapshot
            .components
            .iter()
            .cloned()
            .map(BundleComponentRow::normalized)
            .collect();

        let aggregated = Self::aggregate_component_costs(&components);
        debug!(parents = aggregated.len(), "aggregated component costs");

        let mut items = Self::apply_costs(&snapshot.items, &aggregated);
        for line in &mut items {
            line.margin_pct = self.compute_margin(line);
        }

        let totals = self.compute_header_totals(&items, snapshot.overhead, snapshot.total_sell);
        debug!(
            total_cost = %totals.total_cost,
            profit = %totals.profit,
            margin_pct = %totals.margin_pct,
            "header totals"
        );

        CostingOutcome {
            items,
            components,
            totals,
        }
    }

    /// Sum of line amounts, for hosts without a separate document total.
    #[must_use]
    pub fn total_sell_from_lines(parents: &[ParentLine]) -> Decimal {
        arith::total(
            parents
                .iter()
                .map(|line| arith::product(line.quantity, line.rate)),
        )
    }
}

impl Default for BundleCostEngine {
    fn default() -> Self {
        Self::from_config(&CostingConfig::default())
    }
}
