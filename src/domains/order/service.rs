use crate::domains::core::ApiClient;
use crate::domains::order::types::{
    ExportSnapshot, ExportSnapshotEnvelope, NewDistributorOrder, OrderCountQuery, OrderTotals,
    ShopOrderRecord,
};
use crate::errors::{ServiceError, ServiceResult};
use crate::validation::Validate;
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

/// Trait defining order service operations
#[async_trait]
pub trait OrderService: Send + Sync {
    async fn fetch_shop_orders(&self) -> ServiceResult<Vec<ShopOrderRecord>>;

    /// Combined inventory + distributor-order listing for bulk export.
    async fn export_snapshot(&self) -> ServiceResult<ExportSnapshot>;

    /// Validates and places a distributor order.
    async fn create_distributor_order(&self, order: &NewDistributorOrder) -> ServiceResult<()>;

    /// Totals for a distributor over a date window. A zero product id asks
    /// for the overall amount; any other id asks for that product's count.
    async fn order_count(&self, query: &OrderCountQuery) -> ServiceResult<OrderTotals>;
}

pub struct OrderServiceImpl {
    api: Arc<ApiClient>,
}

impl OrderServiceImpl {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl OrderService for OrderServiceImpl {
    async fn fetch_shop_orders(&self) -> ServiceResult<Vec<ShopOrderRecord>> {
        self.api.get_json("/admin/get-orders").await
    }

    async fn export_snapshot(&self) -> ServiceResult<ExportSnapshot> {
        let envelope: ExportSnapshotEnvelope = self.api.get_json("/admin/getallexports").await?;

        if !envelope.success {
            return Err(ServiceError::ExternalService(
                "Export snapshot request reported failure".to_string(),
            ));
        }

        info!(
            "Loaded export snapshot: {} inventory records, {} distributor orders",
            envelope.data.product_inventory.len(),
            envelope.data.distributor_orders.len()
        );
        Ok(envelope.data)
    }

    async fn create_distributor_order(&self, order: &NewDistributorOrder) -> ServiceResult<()> {
        order.validate()?;

        self.api
            .post_json_unit("/admin/distributor-order", order)
            .await?;

        info!(
            "Placed distributor order: product {} x{} for distributor {}",
            order.product_id, order.quantity, order.distributor_id
        );
        Ok(())
    }

    async fn order_count(&self, query: &OrderCountQuery) -> ServiceResult<OrderTotals> {
        query.validate()?;

        let path = if query.product_id == 0 {
            "/admin/distributortotalamount"
        } else {
            "/admin/distributorOrderCount"
        };

        self.api.post_json(path, query).await
    }
}
