pub mod service;
pub mod types;

pub use service::{CatalogService, CatalogServiceImpl};
pub use types::{
    Distributor, DistributorRef, DistributorUpdate, Product, ReferenceData, Salesperson,
    SalespersonUpdate,
};
