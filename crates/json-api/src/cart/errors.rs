//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart item not found"),
        CartsServiceError::ProductNotFound => StatusError::not_found().brief("Product not found"),
        CartsServiceError::InsufficientStock {
            requested,
            available,
        } => StatusError::conflict()
            .brief("Insufficient stock")
            .detail(format!("requested {requested}, {available} in stock")),
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be at least 1")
        }
        CartsServiceError::Sql(source) => {
            error!("cart operation failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
