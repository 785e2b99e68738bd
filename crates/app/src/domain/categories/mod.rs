//! Categories

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use data::NewCategory;
pub use errors::CategoriesServiceError;
pub use records::{CategoryRecord, CategoryUuid};
pub use service::*;
