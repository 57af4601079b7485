use crate::domains::catalog::types::{
    Distributor, DistributorRef, DistributorUpdate, Product, ReferenceData, Salesperson,
    SalespersonUpdate,
};
use crate::domains::core::ApiClient;
use crate::errors::{ServiceResult, ValidationError};
use crate::validation::Validate;
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

/// Trait defining catalog service operations
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn fetch_products(&self) -> ServiceResult<Vec<Product>>;

    async fn fetch_distributor_refs(&self) -> ServiceResult<Vec<DistributorRef>>;

    /// Loads products and distributor references concurrently. Order forms
    /// need both lists before they can render; either failure fails the pair.
    async fn fetch_reference_data(&self) -> ServiceResult<ReferenceData>;

    async fn fetch_distributors(&self) -> ServiceResult<Vec<Distributor>>;

    async fn fetch_salespersons(&self) -> ServiceResult<Vec<Salesperson>>;

    /// Current stock level for a product. The backend returns a bare number.
    async fn product_stock(&self, product_id: i64) -> ServiceResult<i64>;

    async fn update_distributor(&self, id: &str, changes: &DistributorUpdate)
        -> ServiceResult<()>;

    async fn delete_distributor(&self, id: &str) -> ServiceResult<()>;

    async fn update_salesperson(&self, id: &str, changes: &SalespersonUpdate)
        -> ServiceResult<()>;
}

pub struct CatalogServiceImpl {
    api: Arc<ApiClient>,
}

impl CatalogServiceImpl {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn fetch_products(&self) -> ServiceResult<Vec<Product>> {
        self.api.get_json("/admin/get-products").await
    }

    async fn fetch_distributor_refs(&self) -> ServiceResult<Vec<DistributorRef>> {
        self.api.get_json("/salesperson/get-distributors").await
    }

    async fn fetch_reference_data(&self) -> ServiceResult<ReferenceData> {
        let (distributors, products) =
            futures::try_join!(self.fetch_distributor_refs(), self.fetch_products())?;

        info!(
            "Loaded reference data: {} products, {} distributors",
            products.len(),
            distributors.len()
        );

        Ok(ReferenceData {
            products,
            distributors,
        })
    }

    async fn fetch_distributors(&self) -> ServiceResult<Vec<Distributor>> {
        self.api.get_json("/admin/get-distributors").await
    }

    async fn fetch_salespersons(&self) -> ServiceResult<Vec<Salesperson>> {
        self.api.get_json("/admin/get-salesperson").await
    }

    async fn product_stock(&self, product_id: i64) -> ServiceResult<i64> {
        self.api
            .get_json(&format!("/admin/get-inventory/{}", product_id))
            .await
    }

    async fn update_distributor(
        &self,
        id: &str,
        changes: &DistributorUpdate,
    ) -> ServiceResult<()> {
        if changes.is_empty() {
            return Err(
                ValidationError::custom("No changes were made to the distributor").into(),
            );
        }
        changes.validate()?;

        self.api
            .put_json_unit(&format!("/admin/distributor/{}", id), changes)
            .await
    }

    async fn delete_distributor(&self, id: &str) -> ServiceResult<()> {
        self.api
            .delete(&format!("/admin/distributor/{}", id))
            .await
    }

    async fn update_salesperson(
        &self,
        id: &str,
        changes: &SalespersonUpdate,
    ) -> ServiceResult<()> {
        if changes.is_empty() {
            return Err(
                ValidationError::custom("No changes were made to the salesperson").into(),
            );
        }
        changes.validate()?;

        self.api
            .put_json_unit(&format!("/admin/salesperson/{}", id), changes)
            .await
    }
}
