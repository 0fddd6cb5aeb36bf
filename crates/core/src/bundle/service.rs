//! Bundle explosion into per-unit component rows.

use std::collections::BTreeSet;

use bundlecost_shared::ItemCode;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::types::ProductBundle;
use crate::catalog::{BundleCatalog, ItemCatalog};
use crate::costing::{BundleComponentRow, ParentLine};

/// Bundle service for building component tables.
pub struct BundleService;

impl BundleService {
    /// Replaces the component rows of `parent` with rows from `bundle`.
    ///
    /// Rows of other parents are kept in order; the new rows are appended.
    /// Quantities stay per ONE unit of the parent. Bundle lines without an
    /// item code or with a non-positive quantity are skipped. Unit cost is
    /// seeded from the catalog purchase rate.
    #[must_use]
    pub fn explode(
        components: &[BundleComponentRow],
        parent: &ItemCode,
        bundle: &ProductBundle,
        catalog: &impl ItemCatalog,
    ) -> Vec<BundleComponentRow> {
        let mut rows: Vec<BundleComponentRow> = components
            .iter()
            .filter(|row| row.parent_item_code.as_ref() != Some(parent))
            .cloned()
            .collect();

        let before = rows.len();
        rows.extend(bundle.usable_items().map(|(code, item)| {
            BundleComponentRow {
                parent_item_code: Some(parent.clone()),
                item_code: Some(code.clone()),
                description: item.description.clone(),
                uom: item.uom.clone(),
                quantity_per_unit: item.qty,
                unit_cost: catalog.purchase_rate(code),
                row_total: Decimal::ZERO,
            }
            .normalized()
        }));

        debug!(
            parent = %parent,
            bundle = %bundle.name,
            rows = rows.len() - before,
            "exploded product bundle"
        );

        rows
    }

    /// Whether the rows of `parent` must be rebuilt from `bundle`.
    ///
    /// True when the parent has no rows yet, or when the bundle's buildable
    /// component set is non-empty and differs from the components already
    /// present. Lines `explode` skips do not count.
    #[must_use]
    pub fn needs_rebuild(
        components: &[BundleComponentRow],
        parent: &ItemCode,
        bundle: &ProductBundle,
    ) -> bool {
        let existing: Vec<&BundleComponentRow> = components
            .iter()
            .filter(|row| row.parent_item_code.as_ref() == Some(parent))
            .collect();

        if existing.is_empty() {
            return true;
        }

        let wanted: BTreeSet<&ItemCode> = bundle.usable_items().map(|(code, _)| code).collect();
        let present: BTreeSet<&ItemCode> = existing
            .iter()
            .filter_map(|row| row.item_code.as_ref())
            .collect();

        !wanted.is_empty() && wanted != present
    }

    /// Rebuilds component rows for every line with a selected bundle.
    ///
    /// Parents are processed in document line order. When several lines sell
    /// the same item, the item keeps its first position and the last
    /// selected bundle wins.
    /// Unknown bundles and bundles built for another item are skipped so the
    /// host can still save the document.
    #[must_use]
    pub fn sync<C>(
        parents: &[ParentLine],
        components: &[BundleComponentRow],
        catalog: &C,
    ) -> Vec<BundleComponentRow>
    where
        C: ItemCatalog + BundleCatalog,
    {
        let mut bundle_of: Vec<(&ItemCode, &str)> = Vec::new();
        for line in parents {
            if let (Some(code), Some(bundle)) = (&line.item_code, &line.bundle) {
                match bundle_of.iter().position(|(seen, _)| *seen == code) {
                    Some(i) => bundle_of[i].1 = bundle.as_str(),
                    None => bundle_of.push((code, bundle.as_str())),
                }
            }
        }

        let mut rows = components.to_vec();
        for (parent, name) in bundle_of {
            let Some(bundle) = catalog.product_bundle(name) else {
                warn!(parent = %parent, bundle = name, "product bundle not found, skipping");
                continue;
            };
            if &bundle.parent_item != parent {
                warn!(
                    parent = %parent,
                    bundle = name,
                    bundle_parent = %bundle.parent_item,
                    "product bundle belongs to another item, skipping"
                );
                continue;
            }
            if Self::needs_rebuild(&rows, parent, &bundle) {
                rows = Self::explode(&rows, parent, &bundle, catalog);
            }
        }

        rows
    }

    /// Item codes of main lines, in first-seen order without duplicates.
    ///
    /// Component rows may only be attached to these items.
    #[must_use]
    pub fn main_item_codes(parents: &[ParentLine]) -> Vec<ItemCode> {
        let mut seen = BTreeSet::new();
        parents
            .iter()
            .filter(|line| line.is_main)
            .filter_map(|line| line.item_code.clone())
            .filter(|code| seen.insert(code.clone()))
            .collect()
    }
}
