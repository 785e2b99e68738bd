//! User Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found"),
        UsersServiceError::AlreadyExists => StatusError::conflict().brief("User already exists"),
        UsersServiceError::MissingRequiredData | UsersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid user payload")
        }
        UsersServiceError::Sql(source) => {
            error!("user query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
