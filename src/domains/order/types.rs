use crate::domains::inventory::InventoryRecord;
use crate::errors::DomainResult;
use crate::validation::{Validate, ValidationBuilder};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line item inside a shop order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_name: String,
    pub quantity: i64,
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(default)]
    pub variant_value: Option<String>,
}

/// Advance/balance bookkeeping attached to partially paid orders
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialPayment {
    pub id: i64,
    pub initial_amount: Decimal,
    pub remaining_amount: Decimal,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A shop order as the backend reports it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopOrderRecord {
    pub order_id: String,
    pub shop_name: String,
    pub employee_name: String,
    pub distributor_name: String,
    #[serde(default)]
    pub order_date: Option<DateTime<Utc>>,
    pub contact_number: String,
    #[serde(default)]
    pub products: Vec<OrderItem>,
    pub total_amount: Decimal,
    pub payment_type: String,
    #[serde(default)]
    pub delivery_date: Option<DateTime<Utc>>,
    pub delivery_slot: String,
    pub status: String,
    #[serde(default)]
    pub partial_payment: Option<PartialPayment>,
    #[serde(default)]
    pub payment_status: Option<String>,
}

/// A distributor order as the backend reports it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributorOrderRecord {
    pub id: i64,
    pub distributor_id: i64,
    pub distributor_name: String,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    #[serde(default)]
    pub dispatch_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for placing a distributor order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDistributorOrder {
    pub product_id: i64,
    pub product_name: String,
    pub distributor_id: i64,
    pub distributor_name: String,
    pub quantity: i64,
}

impl Validate for NewDistributorOrder {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("productId", Some(self.product_id))
            .required()
            .validate()?;

        ValidationBuilder::new("productName", Some(self.product_name.clone()))
            .required()
            .validate()?;

        ValidationBuilder::new("distributorId", Some(self.distributor_id))
            .required()
            .validate()?;

        ValidationBuilder::new("distributorName", Some(self.distributor_name.clone()))
            .required()
            .validate()?;

        ValidationBuilder::new("quantity", Some(self.quantity))
            .min(1)
            .validate()?;

        Ok(())
    }
}

/// Query for distributor order totals over a date window.
///
/// A zero `product_id` means "all products" and selects the total-amount
/// endpoint rather than the per-product count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCountQuery {
    pub product_id: i64,
    pub distributor_id: i64,
    pub start_date: String,
    pub end_date: String,
}

impl Validate for OrderCountQuery {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("startDate", Some(self.start_date.clone()))
            .required()
            .validate()?;

        ValidationBuilder::new("endDate", Some(self.end_date.clone()))
            .required()
            .validate()?;

        ValidationBuilder::new("distributorId", Some(self.distributor_id))
            .required()
            .validate()?;

        Ok(())
    }
}

/// Totals reported for an order-count query
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    #[serde(default)]
    pub final_quantity: i64,
    #[serde(default)]
    pub final_amount: Option<Decimal>,
}

impl OrderTotals {
    /// Amount with the backend's missing and null cases collapsed to zero.
    pub fn amount(&self) -> Decimal {
        self.final_amount.unwrap_or_default()
    }
}

/// Combined listing the backend assembles for bulk export
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub product_inventory: Vec<InventoryRecord>,
    pub distributor_orders: Vec<DistributorOrderRecord>,
}

/// Wire envelope around the export snapshot
#[derive(Debug, Clone, Deserialize)]
pub struct ExportSnapshotEnvelope {
    pub success: bool,
    pub data: ExportSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_shop_order_deserializes_with_null_partial_payment() {
        let json = r#"{
            "orderId": "ORD-991",
            "shopName": "Corner Mart",
            "employeeName": "Priya",
            "distributorName": "Acme Distribution",
            "orderDate": "2026-02-10T09:30:00.000Z",
            "contactNumber": "9876543210",
            "products": [
                {"productName": "Almond Biscuits", "quantity": 3, "variant": "Family Pack", "variantValue": "500g"},
                {"productName": "Green Tea", "quantity": 0, "variant": null, "variantValue": null}
            ],
            "totalAmount": 1540.5,
            "paymentType": "Credit",
            "deliveryDate": null,
            "deliverySlot": "Morning",
            "status": "Pending",
            "partialPayment": null,
            "paymentStatus": "Unpaid"
        }"#;

        let order: ShopOrderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_id, "ORD-991");
        assert_eq!(order.products.len(), 2);
        assert_eq!(order.total_amount, dec!(1540.5));
        assert!(order.partial_payment.is_none());
        assert!(order.delivery_date.is_none());
    }

    #[test]
    fn test_shop_order_deserializes_partial_payment() {
        let json = r#"{
            "orderId": "ORD-992",
            "shopName": "Corner Mart",
            "employeeName": "Priya",
            "distributorName": "Acme Distribution",
            "orderDate": null,
            "contactNumber": "9876543210",
            "products": [],
            "totalAmount": 1000,
            "paymentType": "Partial",
            "deliveryDate": null,
            "deliverySlot": "Evening",
            "status": "Confirmed",
            "partialPayment": {
                "id": 4,
                "initialAmount": 400,
                "remainingAmount": 600,
                "dueDate": "2026-03-01T00:00:00.000Z",
                "paymentStatus": "Due",
                "createdAt": "2026-02-10T09:30:00.000Z",
                "updatedAt": "2026-02-10T09:30:00.000Z"
            }
        }"#;

        let order: ShopOrderRecord = serde_json::from_str(json).unwrap();
        let payment = order.partial_payment.unwrap();
        assert_eq!(payment.initial_amount, dec!(400));
        assert_eq!(payment.remaining_amount, dec!(600));
        assert!(payment.due_date.is_some());
    }

    #[test]
    fn test_new_order_validation() {
        let order = NewDistributorOrder {
            product_id: 3,
            product_name: "Almond Biscuits".to_string(),
            distributor_id: 9,
            distributor_name: "Acme Distribution".to_string(),
            quantity: 12,
        };
        assert!(order.validate().is_ok());

        let no_distributor = NewDistributorOrder {
            distributor_id: 0,
            ..order.clone()
        };
        assert!(no_distributor.validate().is_err());

        let zero_quantity = NewDistributorOrder {
            quantity: 0,
            ..order
        };
        assert!(zero_quantity.validate().is_err());
    }

    #[test]
    fn test_count_query_validation() {
        let query = OrderCountQuery {
            product_id: 0,
            distributor_id: 9,
            start_date: "2026-01-01".to_string(),
            end_date: "2026-01-31".to_string(),
        };
        // Zero product id is valid and means "all products"
        assert!(query.validate().is_ok());

        let no_dates = OrderCountQuery {
            start_date: String::new(),
            ..query.clone()
        };
        assert!(no_dates.validate().is_err());

        let no_distributor = OrderCountQuery {
            distributor_id: 0,
            ..query
        };
        assert!(no_distributor.validate().is_err());
    }

    #[test]
    fn test_order_totals_amount_defaults_to_zero() {
        let totals: OrderTotals = serde_json::from_str(r#"{"finalQuantity": 42}"#).unwrap();
        assert_eq!(totals.final_quantity, 42);
        assert_eq!(totals.amount(), Decimal::ZERO);

        let totals: OrderTotals =
            serde_json::from_str(r#"{"finalQuantity": 10, "finalAmount": 2400.75}"#).unwrap();
        assert_eq!(totals.amount(), dec!(2400.75));
    }

    #[test]
    fn test_snapshot_envelope_deserializes() {
        let json = r#"{
            "success": true,
            "data": {
                "productInventory": [{
                    "id": 1,
                    "productId": 3,
                    "productName": "Almond Biscuits",
                    "quantity": 120,
                    "unitPrice": 24.5,
                    "createdAt": "2026-01-05T06:30:00.000Z",
                    "updatedAt": "2026-01-06T10:00:00.000Z",
                    "reserve1": "",
                    "reserve2": "",
                    "reserve3": ""
                }],
                "distributorOrders": [{
                    "id": 11,
                    "distributorId": 9,
                    "distributorName": "Acme Distribution",
                    "productId": 3,
                    "productName": "Almond Biscuits",
                    "quantity": 40,
                    "dispatchDate": null,
                    "createdAt": "2026-02-01T06:30:00.000Z",
                    "updatedAt": "2026-02-01T06:30:00.000Z"
                }]
            }
        }"#;

        let envelope: ExportSnapshotEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data.product_inventory.len(), 1);
        assert_eq!(envelope.data.distributor_orders.len(), 1);
        assert!(envelope.data.distributor_orders[0].dispatch_date.is_none());
    }
}
