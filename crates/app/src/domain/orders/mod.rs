//! Orders

pub mod data;
pub mod errors;
pub mod records;
mod repositories;
pub mod service;

pub use data::NewOrder;
pub use errors::OrdersServiceError;
pub use records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderStatus, OrderUuid};
pub use service::*;
