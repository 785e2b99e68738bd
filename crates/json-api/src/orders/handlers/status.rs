//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    observability,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// One of `placed`, `paid`, `shipped`
    pub status: String,
}

/// Update Order Status Handler
///
/// Overwrites an order's status. Staff only.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status changed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller is not staff"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
#[tracing::instrument(
    name = "orders.status",
    skip(order, json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let order = order.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(principal.user));
    span.record("order_uuid", tracing::field::display(order));

    let order = state
        .app
        .orders
        .update_status(principal, order.into(), json.into_inner().status)
        .await
        .map_err(into_status_error)?;

    tracing::info!(order_uuid = %order.uuid, status = %order.status, "order status changed");

    observability::record_order_status_change(order.status.as_str());

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

    use crate::test_helpers::{Mocks, customer, make_order, staff};

    use super::*;

    fn route() -> Router {
        Router::with_path("orders/{order}/status").patch(handler)
    }

    #[tokio::test]
    async fn test_staff_can_change_status() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_status()
            .once()
            .withf(move |actor, o, status| *actor == staff() && *o == uuid && status == "shipped")
            .return_once(move |_, _, _| Ok(make_order(uuid, OrderStatus::Shipped)));

        let service = Mocks {
            orders,
            ..Mocks::default()
        }
        .staff_service(route());

        let response: OrderResponse =
            TestClient::patch(format!("http://example.com/orders/{uuid}/status"))
                .json(&json!({ "status": "shipped" }))
                .send(&service)
                .await
                .take_json()
                .await?;

        assert_eq!(response.status, "shipped");

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_gets_403() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_status()
            .once()
            .withf(|actor, _, _| *actor == customer())
            .return_once(|_, _, _| Err(OrdersServiceError::PermissionDenied));

        let service = Mocks {
            orders,
            ..Mocks::default()
        }
        .customer_service(route());

        let res = TestClient::patch(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "paid" }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_status()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::InvalidStatus));

        let service = Mocks {
            orders,
            ..Mocks::default()
        }
        .staff_service(route());

        let res = TestClient::patch(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "lost" }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
