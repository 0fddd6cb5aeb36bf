//! Property-based tests for the costing pipeline.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use bundlecost_shared::ItemCode;

use super::engine::BundleCostEngine;
use super::types::{BundleComponentRow, CostingSnapshot, ParentLine};

const CODES: [&str; 4] = ["A", "B", "C", "D"];

/// Strategy to generate a non-negative amount with two decimals.
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a small quantity with up to three decimals.
fn quantity() -> impl Strategy<Value = Decimal> {
    (0i64..100_000i64).prop_map(|milli| Decimal::new(milli, 3))
}

fn code_strategy() -> impl Strategy<Value = Option<ItemCode>> {
    prop_oneof![
        1 => Just(None::<ItemCode>),
        6 => (0usize..CODES.len()).prop_map(|i| ItemCode::parse(CODES[i])),
    ]
}

fn component_strategy() -> impl Strategy<Value = BundleComponentRow> {
    (code_strategy(), quantity(), amount(), amount()).prop_map(|(parent, qty, cost, stale)| {
        BundleComponentRow {
            parent_item_code: parent,
            quantity_per_unit: qty,
            unit_cost: cost,
            row_total: stale,
            ..BundleComponentRow::default()
        }
    })
}

fn line_strategy() -> impl Strategy<Value = ParentLine> {
    (code_strategy(), quantity(), amount(), any::<bool>(), amount()).prop_map(
        |(code, qty, rate, is_main, manual)| ParentLine {
            item_code: code,
            quantity: qty,
            rate,
            is_main,
            manual_unit_cost: manual,
            ..ParentLine::default()
        },
    )
}

fn snapshot_strategy() -> impl Strategy<Value = CostingSnapshot> {
    (
        prop::collection::vec(line_strategy(), 0..8),
        prop::collection::vec(component_strategy(), 0..16),
        amount(),
        amount(),
    )
        .prop_map(|(items, components, overhead, total_sell)| CostingSnapshot {
            items,
            components,
            overhead,
            total_sell,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 1: Idempotence.
    ///
    /// Recomputing the outcome of a recompute changes nothing.
    #[test]
    fn prop_recompute_is_idempotent(snapshot in snapshot_strategy()) {
        let engine = BundleCostEngine::default();

        let first = engine.recompute(&snapshot);
        let again = engine.recompute(&first.clone().into_snapshot(snapshot.overhead, snapshot.total_sell));

        prop_assert_eq!(first, again);
    }

    /// Property 2: Non-main lines keep their manual cost.
    #[test]
    fn prop_non_main_cost_preserved(snapshot in snapshot_strategy()) {
        let engine = BundleCostEngine::default();

        let outcome = engine.recompute(&snapshot);

        for (before, after) in snapshot.items.iter().zip(&outcome.items) {
            prop_assert_eq!(before.manual_unit_cost, after.manual_unit_cost);
            if !before.is_main && before.item_code.is_some() {
                prop_assert_eq!(after.unit_cost, before.manual_unit_cost);
            }
        }
    }

    /// Property 3: Main lines take exactly the sum of their component rows.
    #[test]
    fn prop_main_cost_is_component_sum(snapshot in snapshot_strategy()) {
        let engine = BundleCostEngine::default();

        let outcome = engine.recompute(&snapshot);

        for line in outcome.items.iter().filter(|l| l.is_main) {
            let Some(code) = &line.item_code else { continue };
            let expected: Decimal = snapshot
                .components
                .iter()
                .filter(|row| row.parent_item_code.as_ref() == Some(code))
                .map(|row| row.quantity_per_unit * row.unit_cost)
                .sum();
            prop_assert_eq!(line.unit_cost, expected);
            prop_assert_eq!(line.total_cost, line.quantity * expected);
        }
    }

    /// Property 4: Row totals always follow their inputs.
    #[test]
    fn prop_row_totals_recomputed(snapshot in snapshot_strategy()) {
        let outcome = BundleCostEngine::default().recompute(&snapshot);

        for row in &outcome.components {
            prop_assert_eq!(row.row_total, row.quantity_per_unit * row.unit_cost);
        }
    }

    /// Property 5: Header cost is line costs plus overhead, profit balances.
    #[test]
    fn prop_header_totals_balance(snapshot in snapshot_strategy()) {
        let outcome = BundleCostEngine::default().recompute(&snapshot);

        let line_costs: Decimal = outcome.items.iter().map(|l| l.total_cost).sum();
        prop_assert_eq!(outcome.totals.total_cost, line_costs + snapshot.overhead);
        prop_assert_eq!(outcome.totals.profit + outcome.totals.total_cost, snapshot.total_sell);
    }

    /// Property 6: A zero rate never yields a non-zero margin.
    #[test]
    fn prop_zero_rate_margin_is_zero(cost in amount(), qty in quantity()) {
        let engine = BundleCostEngine::default();
        let mut line = ParentLine::new(ItemCode::parse("A"), qty, Decimal::ZERO);
        line.unit_cost = cost;

        prop_assert_eq!(engine.compute_margin(&line), Decimal::ZERO);
    }
}

mod unit_tests {
    use super::*;

    fn code(raw: &str) -> ItemCode {
        ItemCode::parse(raw).unwrap()
    }

    #[test]
    fn test_full_pipeline() {
        let engine = BundleCostEngine::default();
        let snapshot = CostingSnapshot {
            items: vec![
                ParentLine::new(Some(code("A")), dec!(2), dec!(20)).main(),
                ParentLine::new(Some(code("B")), dec!(1), dec!(50)).with_manual_cost(dec!(30)),
            ],
            components: vec![
                BundleComponentRow::new(code("A"), dec!(2), dec!(5)),
                BundleComponentRow::new(code("A"), dec!(1), dec!(3)),
                BundleComponentRow::new(code("B"), dec!(1), dec!(1000)),
            ],
            overhead: dec!(4),
            total_sell: dec!(90),
        };

        let outcome = engine.recompute(&snapshot);

        let a = &outcome.items[0];
        assert_eq!(a.unit_cost, dec!(13));
        assert_eq!(a.total_cost, dec!(26));
        assert_eq!(a.margin_pct, dec!(35));
        assert_eq!(a.amount, dec!(40));

        let b = &outcome.items[1];
        assert_eq!(b.unit_cost, dec!(30));
        assert_eq!(b.total_cost, dec!(30));
        assert_eq!(b.margin_pct, dec!(40));

        assert_eq!(outcome.totals.total_cost, dec!(60));
        assert_eq!(outcome.totals.profit, dec!(30));
        assert_eq!(outcome.totals.margin_pct, dec!(50));
        assert_eq!(outcome.components[0].row_total, dec!(10));
    }

    #[test]
    fn test_empty_snapshot() {
        let engine = BundleCostEngine::default();
        let snapshot = CostingSnapshot {
            overhead: dec!(10),
            total_sell: dec!(100),
            ..CostingSnapshot::default()
        };

        let outcome = engine.recompute(&snapshot);

        assert!(outcome.items.is_empty());
        assert!(outcome.components.is_empty());
        assert_eq!(outcome.totals.total_cost, dec!(10));
        assert_eq!(outcome.totals.profit, dec!(90));
        assert_eq!(outcome.totals.margin_pct, dec!(900));
    }

    #[test]
    fn test_empty_snapshot_without_overhead() {
        let outcome = BundleCostEngine::default().recompute(&CostingSnapshot {
            total_sell: dec!(100),
            ..CostingSnapshot::default()
        });

        assert_eq!(outcome.totals.total_cost, Decimal::ZERO);
        assert_eq!(outcome.totals.profit, dec!(100));
        assert_eq!(outcome.totals.margin_pct, Decimal::ZERO);
    }

    #[test]
    fn test_main_toggle_switches_cost_source() {
        let engine = BundleCostEngine::default();
        let mut snapshot = CostingSnapshot {
            items: vec![ParentLine::new(Some(code("X")), dec!(1), dec!(100)).with_manual_cost(dec!(999))],
            components: vec![BundleComponentRow::new(code("X"), dec!(3), dec!(4))],
            ..CostingSnapshot::default()
        };

        assert_eq!(engine.recompute(&snapshot).items[0].unit_cost, dec!(999));

        snapshot.items[0].is_main = true;
        assert_eq!(engine.recompute(&snapshot).items[0].unit_cost, dec!(12));
    }
}
