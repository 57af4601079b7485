use crate::domains::core::ApiClient;
use crate::domains::inventory::types::{NewInventoryEntry, UnitPriceInfo};
use crate::errors::ServiceResult;
use crate::validation::Validate;
use async_trait::async_trait;
use log::info;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Trait defining inventory service operations
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Most recent unit price recorded for a product, or `None` when the
    /// product has no price history yet.
    async fn last_unit_price(&self, product_id: i64) -> ServiceResult<Option<Decimal>>;

    /// Validates and records a stock entry.
    async fn create_entry(&self, entry: &NewInventoryEntry) -> ServiceResult<()>;
}

pub struct InventoryServiceImpl {
    api: Arc<ApiClient>,
}

impl InventoryServiceImpl {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl InventoryService for InventoryServiceImpl {
    async fn last_unit_price(&self, product_id: i64) -> ServiceResult<Option<Decimal>> {
        let info: Option<UnitPriceInfo> = self
            .api
            .get_json_opt(&format!("/admin/getLastUnitPrice/{}", product_id))
            .await?;

        Ok(info.map(|i| i.unit_price))
    }

    async fn create_entry(&self, entry: &NewInventoryEntry) -> ServiceResult<()> {
        entry.validate()?;

        self.api
            .post_json_unit("/admin/create-inventory", entry)
            .await?;

        info!(
            "Recorded inventory entry: product {} quantity {}",
            entry.product_id, entry.quantity
        );
        Ok(())
    }
}
