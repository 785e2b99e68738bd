//! Favorite Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::favorites::FavoritesServiceError;

pub(crate) fn into_status_error(error: FavoritesServiceError) -> StatusError {
    match error {
        FavoritesServiceError::ProductNotFound => {
            StatusError::not_found().brief("Product not found")
        }
        FavoritesServiceError::Sql(source) => {
            error!("favorites operation failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
