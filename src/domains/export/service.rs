use async_trait::async_trait;
use chrono::Utc;
use log::{error, info, warn};
use std::path::Path;
use std::sync::Arc;

use crate::domains::core::cache_storage::CacheStorage;
use crate::domains::core::share::{ShareOutcome, ShareService};
use crate::domains::export::record::{CellValue, SheetRecord};
use crate::domains::export::types::{
    ExportError, ExportKind, ExportResult, ExportSummary, XLSX_MIME_TYPE, XLSX_UTI,
};
use crate::domains::export::workbook::build_workbook_base64;
use crate::domains::inventory::types::InventoryRecord;
use crate::domains::order::types::{DistributorOrderRecord, ShopOrderRecord};

/// Trait defining export service operations
#[async_trait]
pub trait ExportService: Send + Sync {
    async fn export_product_inventory(
        &self,
        records: &[InventoryRecord],
    ) -> ExportResult<ExportSummary>;

    async fn export_distributor_orders(
        &self,
        records: &[DistributorOrderRecord],
    ) -> ExportResult<ExportSummary>;

    async fn export_shop_orders(
        &self,
        records: &[ShopOrderRecord],
    ) -> ExportResult<ExportSummary>;
}

pub struct ExportServiceImpl {
    cache: Arc<dyn CacheStorage>,
    share: Arc<dyn ShareService>,
}

impl ExportServiceImpl {
    pub fn new(cache: Arc<dyn CacheStorage>, share: Arc<dyn ShareService>) -> Self {
        Self { cache, share }
    }

    /// Runs the export pipeline for one record kind.
    ///
    /// Empty datasets and missing share support are rejected before any
    /// file is written. Once a file exists it is deleted again on every
    /// path out of this function, success or failure.
    async fn run_export<R: SheetRecord + Sync>(
        &self,
        kind: ExportKind,
        records: &[R],
    ) -> ExportResult<ExportSummary> {
        if records.is_empty() {
            return Err(ExportError::EmptyDataset);
        }

        if !self.share.is_available().await {
            return Err(ExportError::SharingUnsupported);
        }

        let headers = R::headers();
        let rows: Vec<Vec<CellValue>> = records.iter().map(|r| r.cells()).collect();
        let payload = build_workbook_base64(kind.sheet_name(), &headers, &rows)?;

        let file_name = format!(
            "{}_{}.xlsx",
            kind.file_stem(),
            Utc::now().format("%m-%d-%Y")
        );
        let path = self
            .cache
            .file_path(&file_name)
            .map_err(|e| ExportError::FileIo(e.to_string()))?;

        let result = self.write_and_share(kind, &path, &payload).await;

        // Unconditional cleanup; the share sheet has already consumed the file
        if let Err(e) = self.cache.delete(&path).await {
            warn!("Failed to remove export file {:?}: {}", path, e);
        }

        match result {
            Ok((outcome, file_size)) => {
                info!(
                    "Export {} finished with {} data rows, outcome: {}",
                    kind.as_str(),
                    rows.len(),
                    outcome.as_str()
                );
                Ok(ExportSummary {
                    kind,
                    file_name,
                    row_count: rows.len(),
                    file_size,
                    outcome: outcome.as_str().to_string(),
                })
            }
            Err(e) => {
                error!("Export {} failed: {}", kind.as_str(), e);
                Err(e)
            }
        }
    }

    async fn write_and_share(
        &self,
        kind: ExportKind,
        path: &Path,
        payload: &str,
    ) -> ExportResult<(ShareOutcome, u64)> {
        let file_size = self
            .cache
            .write_base64(path, payload)
            .await
            .map_err(|e| ExportError::FileIo(e.to_string()))?;

        let outcome = self
            .share
            .share_file(path, XLSX_MIME_TYPE, XLSX_UTI, kind.dialog_title())
            .await
            .map_err(|e| ExportError::Share(e.to_string()))?;

        Ok((outcome, file_size))
    }
}

#[async_trait]
impl ExportService for ExportServiceImpl {
    async fn export_product_inventory(
        &self,
        records: &[InventoryRecord],
    ) -> ExportResult<ExportSummary> {
        self.run_export(ExportKind::ProductInventory, records).await
    }

    async fn export_distributor_orders(
        &self,
        records: &[DistributorOrderRecord],
    ) -> ExportResult<ExportSummary> {
        self.run_export(ExportKind::DistributorOrders, records).await
    }

    async fn export_shop_orders(
        &self,
        records: &[ShopOrderRecord],
    ) -> ExportResult<ExportSummary> {
        self.run_export(ExportKind::ShopOrders, records).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::core::cache_storage::{
        CacheStorage, CacheStorageError, CacheStorageResult, LocalCacheStorage,
    };
    use crate::domains::core::share::StubShareService;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn sample_inventory() -> Vec<InventoryRecord> {
        let now = Utc.with_ymd_and_hms(2024, 3, 7, 10, 30, 0).unwrap();
        vec![InventoryRecord {
            id: 1,
            product_id: 12,
            product_name: "Masala".to_string(),
            quantity: 40,
            unit_price: dec!(55.5),
            created_at: now,
            updated_at: now,
            reserve1: None,
            reserve2: None,
            reserve3: None,
        }]
    }

    fn cache_in(dir: &TempDir) -> Arc<LocalCacheStorage> {
        let base = dir.path().join("exports");
        Arc::new(LocalCacheStorage::new(base.to_str().unwrap()).unwrap())
    }

    fn cache_files(dir: &TempDir) -> Vec<PathBuf> {
        std::fs::read_dir(dir.path().join("exports"))
            .map(|entries| entries.filter_map(|e| e.ok()).map(|e| e.path()).collect())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_empty_dataset_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let share = Arc::new(StubShareService::completing());
        let service = ExportServiceImpl::new(cache_in(&dir), share.clone());

        let result = service.export_product_inventory(&[]).await;

        assert!(matches!(result, Err(ExportError::EmptyDataset)));
        assert!(cache_files(&dir).is_empty());
        assert!(share.shared_paths().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_share_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let share = Arc::new(StubShareService::unavailable());
        let service = ExportServiceImpl::new(cache_in(&dir), share.clone());

        let result = service.export_product_inventory(&sample_inventory()).await;

        assert!(matches!(result, Err(ExportError::SharingUnsupported)));
        assert!(cache_files(&dir).is_empty());
        assert!(share.shared_paths().is_empty());
    }

    #[tokio::test]
    async fn test_successful_export_cleans_up_file() {
        let dir = TempDir::new().unwrap();
        let share = Arc::new(StubShareService::completing());
        let service = ExportServiceImpl::new(cache_in(&dir), share.clone());

        let summary = service
            .export_product_inventory(&sample_inventory())
            .await
            .unwrap();

        assert!(summary.file_name.starts_with("ProductInventory_"));
        assert!(summary.file_name.ends_with(".xlsx"));
        assert_eq!(summary.row_count, 1);
        assert!(summary.file_size > 0);
        assert_eq!(summary.outcome, "completed");

        let shared = share.shared_paths();
        assert_eq!(shared.len(), 1);
        // The file handed to the share sheet is gone afterwards
        assert!(!shared[0].exists());
        assert!(cache_files(&dir).is_empty());
    }

    #[tokio::test]
    async fn test_dismissed_share_is_still_success() {
        let dir = TempDir::new().unwrap();
        let share = Arc::new(StubShareService::dismissing());
        let service = ExportServiceImpl::new(cache_in(&dir), share.clone());

        let summary = service
            .export_distributor_orders(&sample_distributor_orders())
            .await
            .unwrap();

        assert_eq!(summary.outcome, "dismissed");
        assert!(cache_files(&dir).is_empty());
    }

    #[tokio::test]
    async fn test_share_failure_still_cleans_up_file() {
        let dir = TempDir::new().unwrap();
        let share = Arc::new(StubShareService::failing(-2));
        let service = ExportServiceImpl::new(cache_in(&dir), share.clone());

        let result = service.export_product_inventory(&sample_inventory()).await;

        assert!(matches!(result, Err(ExportError::Share(_))));
        assert!(cache_files(&dir).is_empty());
    }

    #[tokio::test]
    async fn test_write_failure_never_reaches_share() {
        struct FailingCache;

        #[async_trait]
        impl CacheStorage for FailingCache {
            fn file_path(&self, file_name: &str) -> CacheStorageResult<PathBuf> {
                Ok(PathBuf::from("/nonexistent").join(file_name))
            }

            async fn write_base64(&self, _path: &Path, _payload: &str) -> CacheStorageResult<u64> {
                Err(CacheStorageError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "disk full",
                )))
            }

            async fn delete(&self, _path: &Path) -> CacheStorageResult<()> {
                Ok(())
            }
        }

        let share = Arc::new(StubShareService::completing());
        let service = ExportServiceImpl::new(Arc::new(FailingCache), share.clone());

        let result = service.export_product_inventory(&sample_inventory()).await;

        assert!(matches!(result, Err(ExportError::FileIo(_))));
        assert!(share.shared_paths().is_empty());
    }

    fn sample_distributor_orders() -> Vec<DistributorOrderRecord> {
        let now = Utc.with_ymd_and_hms(2024, 3, 7, 10, 30, 0).unwrap();
        vec![DistributorOrderRecord {
            id: 3,
            distributor_id: 9,
            product_id: 12,
            distributor_name: "North Depot".to_string(),
            product_name: "Masala".to_string(),
            quantity: 20,
            dispatch_date: None,
            created_at: now,
            updated_at: now,
        }]
    }
}
