//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::orders::NewOrder;

use crate::{
    extensions::*,
    observability,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    pub shipping_address: String,

    pub phone: String,

    #[serde(default)]
    pub notes: Option<String>,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder {
            shipping_address: request.shipping_address,
            phone: request.phone,
            notes: request.notes,
        }
    }
}

/// Create Order Handler
///
/// Checks out the caller's cart into a new order and empties the cart.
#[endpoint(
    tags("orders"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing shipping address or phone"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Cart is empty"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(principal.user));

    let order = state
        .app
        .orders
        .create_order(principal, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    span.record("order_uuid", tracing::field::display(order.uuid));

    tracing::info!(
        order_uuid = %order.uuid,
        total_price = order.total_price,
        lines = order.items.len(),
        "order placed"
    );

    observability::record_order_placed(order.total_price);

    res.add_header(LOCATION, format!("/api/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::orders::{
        MockOrdersService, OrderStatus, OrderUuid, OrdersServiceError,
    };

    use crate::test_helpers::{Mocks, customer, make_order};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        Mocks {
            orders,
            ..Mocks::default()
        }
        .customer_service(Router::with_path("orders").post(handler))
    }

    #[tokio::test]
    async fn test_checkout_returns_201_with_location() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .withf(|actor, order| {
                *actor == customer()
                    && *order
                        == NewOrder {
                            shipping_address: "Main St 1".to_owned(),
                            phone: "123".to_owned(),
                            notes: None,
                        }
            })
            .return_once(move |_, _| Ok(make_order(uuid, OrderStatus::Placed)));

        let mut res = TestClient::post("http://example.com/orders")
            .json(&json!({ "shipping_address": "Main St 1", "phone": "123" }))
            .send(&make_service(orders))
            .await;

        let location = res
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/api/orders/{uuid}")));

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(body.status, "placed");
        assert_eq!(body.total_price, 4_000);

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_returns_422() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::EmptyCart));

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({ "shipping_address": "Main St 1", "phone": "123" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_missing_phone_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .withf(|_, order| order.phone.is_empty())
            .return_once(|_, _| Err(OrdersServiceError::MissingPhone));

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({ "shipping_address": "Main St 1", "phone": "" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
