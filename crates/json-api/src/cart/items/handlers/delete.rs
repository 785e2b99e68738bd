//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    cart::{errors::into_status_error, get::CartResponse},
    extensions::*,
    state::State,
};

/// Remove Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Remove Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart item not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "cart.items.delete",
    skip(item, depot),
    fields(
        user_uuid = tracing::field::Empty,
        item_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let item = item.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(principal.user));
    span.record("item_uuid", tracing::field::display(item));

    let cart = state
        .app
        .carts
        .remove_item(principal, item.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
