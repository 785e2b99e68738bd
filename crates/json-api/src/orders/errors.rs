//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::{OrderStatus, OrdersServiceError};

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::EmptyCart => {
            StatusError::unprocessable_entity().brief("Cart is empty")
        }
        OrdersServiceError::PermissionDenied => {
            StatusError::forbidden().brief("Only staff may change order status")
        }
        OrdersServiceError::InvalidStatus => StatusError::bad_request()
            .brief("Unknown order status")
            .detail(format!(
                "expected one of: {}",
                OrderStatus::ALL.map(OrderStatus::as_str).join(", ")
            )),
        OrdersServiceError::MissingShippingAddress => {
            StatusError::bad_request().brief("Shipping address is required")
        }
        OrdersServiceError::MissingPhone => {
            StatusError::bad_request().brief("Phone number is required")
        }
        OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(source) => {
            error!("order operation failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
