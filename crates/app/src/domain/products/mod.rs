//! Products

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod search;
pub mod service;

pub use data::{NewProduct, ProductFilter};
pub use errors::ProductsServiceError;
pub use records::{ProductCategory, ProductRecord, ProductUuid};
pub use service::*;

/// Maximum number of products returned by the featured listing.
pub const FEATURED_PRODUCTS_LIMIT: i64 = 10;
