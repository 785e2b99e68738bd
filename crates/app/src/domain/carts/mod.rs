//! Carts

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repositories;
pub mod service;

pub use data::NewCartItem;
pub use errors::CartsServiceError;
pub use records::{CartItemRecord, CartItemUuid, CartProduct, CartRecord, CartUuid};
pub use service::*;
