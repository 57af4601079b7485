pub mod service;
pub mod types;

pub use service::{InventoryService, InventoryServiceImpl};
pub use types::{InventoryRecord, NewInventoryEntry, UnitPriceInfo};
