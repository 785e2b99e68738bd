//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::{CartItemRecord, CartProduct, CartRecord};

use crate::{cart::errors::into_status_error, extensions::*, state::State};

/// Product snapshot shown on a cart line
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartProductResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub price: u64,
    pub stock: u32,
    pub image_url: Option<String>,
    pub is_available: bool,
}

impl From<CartProduct> for CartProductResponse {
    fn from(product: CartProduct) -> Self {
        CartProductResponse {
            uuid: product.uuid.into(),
            name: product.name,
            slug: product.slug,
            price: product.price,
            stock: product.stock,
            image_url: product.image_url,
            is_available: product.is_available,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    pub uuid: Uuid,

    pub product: CartProductResponse,

    pub quantity: u32,

    /// Current product price times quantity, in minor currency units
    pub subtotal: u64,

    pub added_at: String,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        let subtotal = item.subtotal();

        CartItemResponse {
            uuid: item.uuid.into(),
            product: item.product.into(),
            quantity: item.quantity,
            subtotal,
            added_at: item.added_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub uuid: Uuid,

    pub items: Vec<CartItemResponse>,

    /// Sum of line subtotals at current prices
    pub total_price: u64,

    /// Sum of line quantities
    pub total_items: u64,

    pub updated_at: String,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        let total_price = cart.total_price();
        let total_items = cart.total_items();

        CartResponse {
            uuid: cart.uuid.into(),
            items: cart.items.into_iter().map(Into::into).collect(),
            total_price,
            total_items,
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// Get Cart Handler
///
/// Returns the caller's cart, creating an empty one on first access.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Current cart"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
#[tracing::instrument(name = "cart.get", skip(depot), err)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let cart = state
        .app
        .carts
        .get_or_create_cart(principal)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
