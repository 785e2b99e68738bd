//! Favorite Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::favorites::FavoriteRecord;

use crate::{
    extensions::*, favorites::errors::into_status_error, products::get::ProductResponse,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FavoriteResponse {
    pub uuid: Uuid,

    pub product: ProductResponse,

    pub created_at: String,
}

impl From<FavoriteRecord> for FavoriteResponse {
    fn from(favorite: FavoriteRecord) -> Self {
        FavoriteResponse {
            uuid: favorite.uuid.into(),
            product: favorite.product.into(),
            created_at: favorite.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FavoritesResponse {
    /// Most recently favorited first
    pub favorites: Vec<FavoriteResponse>,
}

/// Favorite Index Handler
#[endpoint(
    tags("favorites"),
    summary = "List Favorites",
    security(("bearer_auth" = [])),
)]
#[tracing::instrument(name = "favorites.index", skip(depot), err)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<FavoritesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let favorites = state
        .app
        .favorites
        .list_favorites(principal)
        .await
        .map_err(into_status_error)?;

    Ok(Json(FavoritesResponse {
        favorites: favorites.into_iter().map(Into::into).collect(),
    }))
}
