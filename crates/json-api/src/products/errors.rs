//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::CategoryNotFound => {
            StatusError::not_found().brief("Category not found")
        }
        ProductsServiceError::PageOutOfRange => StatusError::not_found().brief("Invalid page"),
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::InvalidReference
        | ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::Sql(source) => {
            error!("product query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
