//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::{OrderItemRecord, OrderRecord};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,

    /// Absent once the product has been deleted
    pub product_uuid: Option<Uuid>,

    /// Product name at checkout
    pub product_name: String,

    pub quantity: u32,

    /// Unit price at checkout, in minor currency units
    pub unit_price: u64,

    pub subtotal: u64,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        let subtotal = item.subtotal();

        OrderItemResponse {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.map(Into::into),
            product_name: item.product_name,
            quantity: item.quantity,
            unit_price: item.unit_price,
            subtotal,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    pub user_uuid: Uuid,

    pub shipping_address: String,

    pub phone: String,

    pub notes: Option<String>,

    /// One of `placed`, `paid`, `shipped`
    pub status: String,

    /// Total fixed at checkout, in minor currency units
    pub total_price: u64,

    pub items: Vec<OrderItemResponse>,

    pub created_at: String,

    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            uuid: order.uuid.into(),
            user_uuid: order.user_uuid.into(),
            shipping_address: order.shipping_address,
            phone: order.phone,
            notes: order.notes,
            status: order.status.to_string(),
            total_price: order.total_price,
            items: order.items.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Get Order Handler
///
/// Returns one of the caller's orders. Staff may read any order.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
#[tracing::instrument(
    name = "orders.get",
    skip(order, depot),
    fields(order_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let order = order.into_inner();

    tracing::Span::current().record("order_uuid", tracing::field::display(order));

    let order = state
        .app
        .orders
        .get_order(principal, order.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
