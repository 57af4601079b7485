pub mod catalog;
pub mod core;
pub mod export;
pub mod inventory;
pub mod order;
