//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    cart::{errors::into_status_error, get::CartResponse},
    extensions::*,
    state::State,
};

/// Clear Cart Handler
///
/// Removes every line from the caller's cart.
#[endpoint(
    tags("cart"),
    summary = "Clear Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Emptied cart"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
#[tracing::instrument(
    name = "cart.clear",
    skip(depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(principal.user));

    let cart = state
        .app
        .carts
        .clear(principal)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
