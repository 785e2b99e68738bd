//! Toggle Favorite Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, favorites::errors::into_status_error, state::State};

/// Toggle Favorite Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ToggleFavoriteRequest {
    pub product_uuid: Uuid,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ToggleFavoriteResponse {
    pub product_uuid: Uuid,

    /// Whether the product is a favorite after the toggle
    pub is_favorite: bool,
}

/// Toggle Favorite Handler
///
/// Adds the product to the caller's favorites, or removes it if already there.
#[endpoint(
    tags("favorites"),
    summary = "Toggle Favorite",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Favorite toggled"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
#[tracing::instrument(
    name = "favorites.toggle",
    skip(json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<ToggleFavoriteRequest>,
    depot: &mut Depot,
) -> Result<Json<ToggleFavoriteResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let product = json.into_inner().product_uuid;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(principal.user));
    span.record("product_uuid", tracing::field::display(product));

    let is_favorite = state
        .app
        .favorites
        .toggle_favorite(principal, product.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ToggleFavoriteResponse {
        product_uuid: product,
        is_favorite,
    }))
}
