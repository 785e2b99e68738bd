//! Favorites

pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::FavoritesServiceError;
pub use records::{FavoriteRecord, FavoriteUuid};
pub use service::*;
