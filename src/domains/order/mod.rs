pub mod service;
pub mod types;

pub use service::{OrderService, OrderServiceImpl};
pub use types::{
    DistributorOrderRecord, ExportSnapshot, NewDistributorOrder, OrderCountQuery, OrderItem,
    OrderTotals, PartialPayment, ShopOrderRecord,
};
