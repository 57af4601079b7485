use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::domains::inventory::types::InventoryRecord;
use crate::domains::order::types::{DistributorOrderRecord, OrderItem, ShopOrderRecord};

/// A single worksheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

/// Trait for types that can be laid out as worksheet rows
pub trait SheetRecord {
    /// Ordered column headers for this record kind
    fn headers() -> Vec<&'static str>;

    /// Ordered cell values matching `headers()`
    fn cells(&self) -> Vec<CellValue>;
}

/// Helper to render a timestamp as a date cell
pub fn date_cell(value: &DateTime<Utc>) -> String {
    value.format("%m/%d/%Y").to_string()
}

/// Helper to render an optional timestamp; absent dates render empty
pub fn optional_date_cell(value: &Option<DateTime<Utc>>) -> String {
    value.as_ref().map(date_cell).unwrap_or_default()
}

/// Helper to render a money amount with exactly two decimal places
pub fn money_cell(value: &Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

/// Helper to render ordered items as one multi-line cell.
///
/// Each line is `<name> (<variant>) x<qty>`; the variant is omitted when
/// absent or empty, and the quantity suffix when the quantity is zero.
pub fn order_items_cell(items: &[OrderItem]) -> String {
    items
        .iter()
        .map(|item| {
            let detail = match item.variant.as_deref().filter(|v| !v.is_empty()) {
                Some(variant) => format!("{} ({})", item.product_name, variant),
                None => item.product_name.clone(),
            };
            if item.quantity > 0 {
                format!("{} x{}", detail, item.quantity)
            } else {
                detail
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl SheetRecord for InventoryRecord {
    fn headers() -> Vec<&'static str> {
        vec![
            "ID",
            "Product ID",
            "Product Name",
            "Unit Price",
            "Quantity",
            "Created At",
            "Updated At",
            "Reserve 1",
            "Reserve 2",
            "Reserve 3",
        ]
    }

    fn cells(&self) -> Vec<CellValue> {
        vec![
            CellValue::Number(self.id as f64),
            CellValue::Number(self.product_id as f64),
            CellValue::Text(self.product_name.clone()),
            CellValue::Number(self.unit_price.to_f64().unwrap_or(0.0)),
            CellValue::Number(self.quantity as f64),
            CellValue::Text(date_cell(&self.created_at)),
            CellValue::Text(date_cell(&self.updated_at)),
            CellValue::Text(self.reserve1.clone().unwrap_or_default()),
            CellValue::Text(self.reserve2.clone().unwrap_or_default()),
            CellValue::Text(self.reserve3.clone().unwrap_or_default()),
        ]
    }
}

impl SheetRecord for DistributorOrderRecord {
    fn headers() -> Vec<&'static str> {
        vec![
            "Order ID",
            "Distributor Name",
            "Product ID",
            "Product Name",
            "Quantity",
            "Dispatch Date",
            "Created At",
            "Updated At",
        ]
    }

    fn cells(&self) -> Vec<CellValue> {
        vec![
            CellValue::Number(self.id as f64),
            CellValue::Text(self.distributor_name.clone()),
            CellValue::Number(self.product_id as f64),
            CellValue::Text(self.product_name.clone()),
            CellValue::Number(self.quantity as f64),
            CellValue::Text(optional_date_cell(&self.dispatch_date)),
            CellValue::Text(date_cell(&self.created_at)),
            CellValue::Text(date_cell(&self.updated_at)),
        ]
    }
}

impl SheetRecord for ShopOrderRecord {
    fn headers() -> Vec<&'static str> {
        vec![
            "Order id",
            "Shop Name",
            "Employee Name",
            "Distributor Name",
            "Order Date",
            "Contact Number",
            "Total Amount",
            "Payment Type",
            "Delivery Date",
            "Delivery Slot",
            "Status",
            "Products",
            "Advance Amount",
            "Balance Amount",
            "Partial Payment Due Date",
            "Partial Payment Status",
        ]
    }

    fn cells(&self) -> Vec<CellValue> {
        let advance = self
            .partial_payment
            .as_ref()
            .map(|p| money_cell(&p.initial_amount))
            .unwrap_or_default();
        let balance = self
            .partial_payment
            .as_ref()
            .map(|p| money_cell(&p.remaining_amount))
            .unwrap_or_default();
        let partial_due = self
            .partial_payment
            .as_ref()
            .map(|p| optional_date_cell(&p.due_date))
            .unwrap_or_default();
        let partial_status = self
            .partial_payment
            .as_ref()
            .map(|p| p.payment_status.clone())
            .unwrap_or_default();

        vec![
            CellValue::Text(self.order_id.clone()),
            CellValue::Text(self.shop_name.clone()),
            CellValue::Text(self.employee_name.clone()),
            CellValue::Text(self.distributor_name.clone()),
            CellValue::Text(optional_date_cell(&self.order_date)),
            CellValue::Text(self.contact_number.clone()),
            CellValue::Text(money_cell(&self.total_amount)),
            CellValue::Text(self.payment_type.clone()),
            CellValue::Text(optional_date_cell(&self.delivery_date)),
            CellValue::Text(self.delivery_slot.clone()),
            CellValue::Text(self.status.clone()),
            CellValue::Text(order_items_cell(&self.products)),
            CellValue::Text(advance),
            CellValue::Text(balance),
            CellValue::Text(partial_due),
            CellValue::Text(partial_status),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn item(name: &str, variant: Option<&str>, quantity: i64) -> OrderItem {
        OrderItem {
            product_name: name.to_string(),
            quantity,
            variant: variant.map(|v| v.to_string()),
            variant_value: None,
        }
    }

    #[test]
    fn test_order_items_cell() {
        let items = vec![item("Masala", Some("500g"), 3), item("Tea", None, 0)];
        assert_eq!(order_items_cell(&items), "Masala (500g) x3\nTea");
    }

    #[test]
    fn test_order_items_cell_ignores_empty_variant() {
        let items = vec![item("Salt", Some(""), 2)];
        assert_eq!(order_items_cell(&items), "Salt x2");
    }

    #[test]
    fn test_money_cell_pads_two_decimals() {
        assert_eq!(money_cell(&dec!(1540.5)), "1540.50");
        assert_eq!(money_cell(&dec!(200)), "200.00");
        assert_eq!(money_cell(&dec!(99.999)), "100.00");
    }

    #[test]
    fn test_optional_date_cell() {
        let date = Utc.with_ymd_and_hms(2024, 3, 7, 10, 30, 0).unwrap();
        assert_eq!(optional_date_cell(&Some(date)), "03/07/2024");
        assert_eq!(optional_date_cell(&None), "");
    }

    #[test]
    fn test_inventory_headers_are_fixed() {
        let headers = InventoryRecord::headers();
        assert_eq!(headers.len(), 10);
        assert_eq!(headers[0], "ID");
        assert_eq!(headers[3], "Unit Price");
        assert_eq!(headers[9], "Reserve 3");
    }

    #[test]
    fn test_shop_order_headers_are_fixed() {
        let headers = ShopOrderRecord::headers();
        assert_eq!(headers.len(), 16);
        assert_eq!(headers[0], "Order id");
        assert_eq!(headers[11], "Products");
        assert_eq!(headers[15], "Partial Payment Status");
    }

    #[test]
    fn test_shop_order_cells_without_partial_payment() {
        let order = ShopOrderRecord {
            order_id: "ORD-100".to_string(),
            shop_name: "Corner Store".to_string(),
            employee_name: "Asha".to_string(),
            distributor_name: "North Depot".to_string(),
            order_date: None,
            contact_number: "9876543210".to_string(),
            products: vec![item("Masala", Some("500g"), 3)],
            total_amount: dec!(1540.5),
            payment_type: "Cash".to_string(),
            delivery_date: None,
            delivery_slot: "Morning".to_string(),
            status: "Pending".to_string(),
            partial_payment: None,
            payment_status: None,
        };

        let cells = order.cells();
        assert_eq!(cells.len(), ShopOrderRecord::headers().len());
        assert_eq!(cells[0], CellValue::Text("ORD-100".to_string()));
        assert_eq!(cells[4], CellValue::Text(String::new()));
        assert_eq!(cells[6], CellValue::Text("1540.50".to_string()));
        assert_eq!(cells[11], CellValue::Text("Masala (500g) x3".to_string()));
        // All four partial payment columns stay empty, not "null"
        for cell in &cells[12..16] {
            assert_eq!(*cell, CellValue::Text(String::new()));
        }
    }

    #[test]
    fn test_inventory_cells_keep_raw_unit_price() {
        let now = Utc.with_ymd_and_hms(2024, 3, 7, 10, 30, 0).unwrap();
        let record = InventoryRecord {
            id: 7,
            product_id: 12,
            product_name: "Masala".to_string(),
            quantity: 40,
            unit_price: dec!(55.125),
            created_at: now,
            updated_at: now,
            reserve1: None,
            reserve2: Some("lot-9".to_string()),
            reserve3: None,
        };

        let cells = record.cells();
        assert_eq!(cells.len(), InventoryRecord::headers().len());
        assert_eq!(cells[3], CellValue::Number(55.125));
        assert_eq!(cells[7], CellValue::Text(String::new()));
        assert_eq!(cells[8], CellValue::Text("lot-9".to_string()));
    }
}
