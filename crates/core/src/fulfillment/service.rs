//! Carrying component lines through the sales document chain.
//!
//! Opportunity bundle rows become the quotation's delivery BOM, which is
//! carried to the sales order. From there the components are appended to
//! the delivery note at zero price and can be ordered from suppliers.

use bundlecost_shared::ItemCode;
use rust_decimal::Decimal;
use tracing::debug;

use super::types::{DeliveryBomRow, DeliveryNoteLine, PurchaseOrderLine};
use crate::catalog::ItemCatalog;
use crate::costing::{BundleComponentRow, arith};

/// Fulfillment mapping service.
pub struct FulfillmentService;

impl FulfillmentService {
    /// Builds a delivery BOM from opportunity component rows.
    ///
    /// Rows without a component item are skipped. Quantities are copied as
    /// they are.
    #[must_use]
    pub fn delivery_bom_from_components(
        components: &[BundleComponentRow],
        catalog: &impl ItemCatalog,
    ) -> Vec<DeliveryBomRow> {
        components
            .iter()
            .filter_map(|row| {
                let item = row.item_code.clone()?;
                Some(DeliveryBomRow {
                    item_name: catalog.display_name(&item),
                    description: row.description.clone(),
                    qty: row.quantity_per_unit,
                    parent_product: row.parent_item_code.clone(),
                    item,
                })
            })
            .collect()
    }

    /// Carries a delivery BOM to the next document, filling blank names.
    #[must_use]
    pub fn carry_delivery_bom(
        rows: &[DeliveryBomRow],
        catalog: &impl ItemCatalog,
    ) -> Vec<DeliveryBomRow> {
        rows.iter()
            .map(|row| {
                let mut row = row.clone();
                if row.item_name.trim().is_empty() {
                    row.item_name = catalog.display_name(&row.item);
                }
                row
            })
            .collect()
    }

    /// Appends delivery BOM components to the delivery note lines.
    ///
    /// Existing lines are kept untouched. Component lines carry no price and
    /// no sales order link; the parent sales order line carries the price.
    /// They take the stock UOM from the catalog and the first warehouse
    /// already used on the note.
    #[must_use]
    pub fn append_delivery_bom(
        lines: &[DeliveryNoteLine],
        bom: &[DeliveryBomRow],
        catalog: &impl ItemCatalog,
    ) -> Vec<DeliveryNoteLine> {
        let default_warehouse = lines.iter().find_map(|line| line.warehouse.clone());

        let mut merged = lines.to_vec();
        merged.extend(bom.iter().map(|row| DeliveryNoteLine {
            item_code: row.item.clone(),
            item_name: if row.item_name.trim().is_empty() {
                catalog.display_name(&row.item)
            } else {
                row.item_name.clone()
            },
            description: row.description.clone(),
            uom: catalog.stock_uom(&row.item),
            qty: row.qty,
            rate: Decimal::ZERO,
            discount_percentage: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            warehouse: default_warehouse.clone(),
            against_sales_order: None,
            so_detail: None,
        }));

        debug!(
            existing = lines.len(),
            appended = bom.len(),
            "appended delivery BOM to delivery note"
        );

        merged
    }

    /// Purchase order lines for the delivery BOM components only.
    ///
    /// Parent products are not ordered. Repeated items are merged into one
    /// line in first-seen order; lines with no positive quantity are dropped.
    #[must_use]
    pub fn purchase_order_lines(
        bom: &[DeliveryBomRow],
        catalog: &impl ItemCatalog,
    ) -> Vec<PurchaseOrderLine> {
        let mut order: Vec<(ItemCode, Vec<Decimal>)> = Vec::new();
        for row in bom {
            match order.iter().position(|(item, _)| item == &row.item) {
                Some(i) => order[i].1.push(row.qty),
                None => order.push((row.item.clone(), vec![row.qty])),
            }
        }

        order
            .into_iter()
            .map(|(item_code, qtys)| (item_code, arith::total(qtys)))
            .filter(|(_, qty)| *qty > Decimal::ZERO)
            .map(|(item_code, qty)| {
                let rate = catalog.purchase_rate(&item_code);
                PurchaseOrderLine {
                    item_name: catalog.display_name(&item_code),
                    uom: catalog.stock_uom(&item_code),
                    amount: arith::product(qty, rate),
                    item_code,
                    qty,
                    rate,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogItem, InMemoryCatalog};
    use rust_decimal_macros::dec;

    fn code(raw: &str) -> ItemCode {
        ItemCode::parse(raw).unwrap()
    }

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new()
            .with_item(
                CatalogItem::new(code("CPU"))
                    .named("Processor")
                    .uom("Nos")
                    .rates(Some(dec!(900)), None),
            )
            .with_item(
                CatalogItem::new(code("RAM"))
                    .named("Memory 16GB")
                    .uom("Nos")
                    .rates(None, Some(dec!(80))),
            )
    }

    fn bom_row(item: &str, qty: Decimal) -> DeliveryBomRow {
        DeliveryBomRow {
            item: code(item),
            item_name: String::new(),
            description: String::new(),
            qty,
            parent_product: Some(code("LAPTOP")),
        }
    }

    #[test]
    fn test_delivery_bom_from_components() {
        let components = vec![
            BundleComponentRow::new(code("LAPTOP"), dec!(1), dec!(900)).with_item(code("CPU")),
            BundleComponentRow::new(code("LAPTOP"), dec!(2), dec!(80)).with_item(code("RAM")),
            BundleComponentRow::new(code("LAPTOP"), dec!(5), dec!(1)),
            BundleComponentRow::new(code("LAPTOP"), dec!(1), dec!(1)).with_item(code("CASE")),
        ];

        let bom = FulfillmentService::delivery_bom_from_components(&components, &catalog());

        assert_eq!(bom.len(), 3);
        assert_eq!(bom[0].item_name, "Processor");
        assert_eq!(bom[1].qty, dec!(2));
        assert_eq!(bom[1].parent_product, Some(code("LAPTOP")));
        assert_eq!(bom[2].item_name, "CASE");
    }

    #[test]
    fn test_carry_fills_blank_names_only() {
        let mut named = bom_row("RAM", dec!(2));
        named.item_name = "Custom RAM".to_string();
        let rows = vec![bom_row("CPU", dec!(1)), named];

        let carried = FulfillmentService::carry_delivery_bom(&rows, &catalog());

        assert_eq!(carried[0].item_name, "Processor");
        assert_eq!(carried[1].item_name, "Custom RAM");
        assert_eq!(carried[1].qty, dec!(2));
    }

    #[test]
    fn test_append_delivery_bom() {
        let so_line = DeliveryNoteLine {
            item_code: code("LAPTOP"),
            item_name: "Laptop".to_string(),
            description: String::new(),
            uom: Some("Nos".to_string()),
            qty: dec!(1),
            rate: dec!(1500),
            discount_percentage: dec!(5),
            discount_amount: dec!(75),
            warehouse: Some("Stores - IT".to_string()),
            against_sales_order: Some("SO-0001".to_string()),
            so_detail: Some("row-1".to_string()),
        };
        let bom = vec![bom_row("CPU", dec!(1)), bom_row("RAM", dec!(2))];

        let lines =
            FulfillmentService::append_delivery_bom(std::slice::from_ref(&so_line), &bom, &catalog());

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], so_line);
        let ram = &lines[2];
        assert_eq!(ram.item_name, "Memory 16GB");
        assert_eq!(ram.uom.as_deref(), Some("Nos"));
        assert_eq!(ram.qty, dec!(2));
        assert_eq!(ram.rate, Decimal::ZERO);
        assert_eq!(ram.discount_percentage, Decimal::ZERO);
        assert_eq!(ram.warehouse.as_deref(), Some("Stores - IT"));
        assert!(ram.against_sales_order.is_none());
        assert!(ram.so_detail.is_none());
    }

    #[test]
    fn test_append_without_existing_lines_has_no_warehouse() {
        let lines =
            FulfillmentService::append_delivery_bom(&[], &[bom_row("CPU", dec!(1))], &catalog());

        assert_eq!(lines.len(), 1);
        assert!(lines[0].warehouse.is_none());
    }

    #[test]
    fn test_purchase_order_lines_merge_items() {
        let bom = vec![
            bom_row("CPU", dec!(1)),
            bom_row("RAM", dec!(2)),
            bom_row("CPU", dec!(3)),
            bom_row("FAN", Decimal::ZERO),
        ];

        let lines = FulfillmentService::purchase_order_lines(&bom, &catalog());

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].item_code, code("CPU"));
        assert_eq!(lines[0].qty, dec!(4));
        assert_eq!(lines[0].rate, dec!(900));
        assert_eq!(lines[0].amount, dec!(3600));
        assert_eq!(lines[1].item_name, "Memory 16GB");
        assert_eq!(lines[1].amount, dec!(160));
    }
}
