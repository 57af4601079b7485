use serde::{Deserialize, Serialize};
use thiserror::Error;

/// MIME type handed to the share sheet for generated workbooks.
pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Uniform type identifier for XLSX on Apple platforms.
pub const XLSX_UTI: &str = "com.microsoft.excel.xlsx";

/// The record kinds the app can export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    ProductInventory,
    DistributorOrders,
    ShopOrders,
}

impl ExportKind {
    /// Name of the single sheet inside the workbook.
    pub fn sheet_name(&self) -> &'static str {
        match self {
            ExportKind::ProductInventory => "Product Inventory",
            ExportKind::DistributorOrders => "Distributor Orders",
            ExportKind::ShopOrders => "Orders",
        }
    }

    /// File name prefix ahead of the date stamp.
    pub fn file_stem(&self) -> &'static str {
        match self {
            ExportKind::ProductInventory => "ProductInventory",
            ExportKind::DistributorOrders => "DistributorOrders",
            ExportKind::ShopOrders => "OrderReport",
        }
    }

    /// Title shown on the platform share dialog.
    pub fn dialog_title(&self) -> &'static str {
        match self {
            ExportKind::ProductInventory => "Export Product Inventory",
            ExportKind::DistributorOrders => "Export Distributor Orders",
            ExportKind::ShopOrders => "Export Orders Report",
        }
    }

    /// Warning shown when there is nothing to export.
    pub fn empty_message(&self) -> &'static str {
        match self {
            ExportKind::ProductInventory => "No inventory records to export.",
            ExportKind::DistributorOrders | ExportKind::ShopOrders => "No orders to export.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportKind::ProductInventory => "product_inventory",
            ExportKind::DistributorOrders => "distributor_orders",
            ExportKind::ShopOrders => "shop_orders",
        }
    }
}

/// Errors the export pipeline can surface
#[derive(Debug, Error, Clone, Serialize)]
pub enum ExportError {
    #[error("Nothing to export")]
    EmptyDataset,

    #[error("Sharing is not available on this device")]
    SharingUnsupported,

    #[error("Workbook serialization failed: {0}")]
    Serialization(String),

    #[error("Export file I/O failed: {0}")]
    FileIo(String),

    #[error("Share failed: {0}")]
    Share(String),
}

impl ExportError {
    /// Alert text the host app shows for this failure.
    pub fn user_message(&self, kind: ExportKind) -> &'static str {
        match self {
            ExportError::EmptyDataset => kind.empty_message(),
            ExportError::SharingUnsupported => "Sharing is not available on this device",
            _ => "There was an error exporting the file. Please try again.",
        }
    }
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Receipt describing a finished export
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub kind: ExportKind,
    pub file_name: String,
    pub row_count: usize,
    pub file_size: u64,
    pub outcome: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(ExportKind::ProductInventory.sheet_name(), "Product Inventory");
        assert_eq!(ExportKind::ProductInventory.file_stem(), "ProductInventory");
        assert_eq!(ExportKind::DistributorOrders.dialog_title(), "Export Distributor Orders");
        assert_eq!(ExportKind::ShopOrders.sheet_name(), "Orders");
        assert_eq!(ExportKind::ShopOrders.file_stem(), "OrderReport");
    }

    #[test]
    fn test_user_messages() {
        let kind = ExportKind::ProductInventory;
        assert_eq!(
            ExportError::EmptyDataset.user_message(kind),
            "No inventory records to export."
        );
        assert_eq!(
            ExportError::EmptyDataset.user_message(ExportKind::ShopOrders),
            "No orders to export."
        );
        assert_eq!(
            ExportError::SharingUnsupported.user_message(kind),
            "Sharing is not available on this device"
        );
        assert_eq!(
            ExportError::FileIo("disk full".to_string()).user_message(kind),
            "There was an error exporting the file. Please try again."
        );
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ExportKind::DistributorOrders).unwrap();
        assert_eq!(json, r#""distributor_orders""#);
    }
}
