//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart item not found")]
    NotFound,

    #[error("product not found")]
    ProductNotFound,

    #[error("only {available} in stock, {requested} requested")]
    InsufficientStock { requested: u64, available: u32 },

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::ProductNotFound,
            Some(ErrorKind::CheckViolation) => Self::InvalidQuantity,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
