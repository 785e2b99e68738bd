//! Favorites service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FavoritesServiceError {
    #[error("product not found")]
    ProductNotFound,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for FavoritesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::ProductNotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::ProductNotFound,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
