pub mod record;
pub mod service;
pub mod types;
pub mod workbook;

pub use record::{CellValue, SheetRecord};
pub use service::{ExportService, ExportServiceImpl};
pub use types::{ExportError, ExportKind, ExportResult, ExportSummary};
