//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::NewCartItem;

use crate::{
    cart::{errors::into_status_error, get::CartResponse},
    extensions::*,
    state::State,
};

const fn default_quantity() -> u32 {
    1
}

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    pub product_uuid: Uuid,

    /// Units to add, merged into an existing line for the same product
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl From<AddCartItemRequest> for NewCartItem {
    fn from(request: AddCartItemRequest) -> Self {
        NewCartItem {
            product_uuid: request.product_uuid.into(),
            quantity: request.quantity,
        }
    }
}

/// Add Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Add Item to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Item added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "cart.items.create",
    skip(json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(principal.user));
    span.record("product_uuid", tracing::field::display(request.product_uuid));
    span.record("quantity", request.quantity);

    let cart = state
        .app
        .carts
        .add_item(principal, request.into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::{CartsServiceError, MockCartsService},
        products::ProductUuid,
    };

    use crate::test_helpers::{Mocks, customer, make_cart, make_cart_item};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        Mocks {
            carts,
            ..Mocks::default()
        }
        .customer_service(Router::with_path("cart/items").post(handler))
    }

    #[tokio::test]
    async fn test_add_item_defaults_quantity_to_one() -> TestResult {
        let product = ProductUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(move |actor, item| {
                *actor == customer()
                    && *item
                        == NewCartItem {
                            product_uuid: product,
                            quantity: 1,
                        }
            })
            .return_once(move |_, _| Ok(make_cart(vec![make_cart_item(product, 1_500, 1)])));

        let mut res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_uuid": product.into_uuid() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: CartResponse = res.take_json().await?;

        assert_eq!(body.total_items, 1);
        assert_eq!(body.total_price, 1_500);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_insufficient_stock_returns_409() -> TestResult {
        let product = ProductUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(move |_, item| item.quantity == 7)
            .return_once(|_, _| {
                Err(CartsServiceError::InsufficientStock {
                    requested: 7,
                    available: 3,
                })
            });

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_uuid": product.into_uuid(), "quantity": 7 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_unknown_product_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::ProductNotFound));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_uuid": ProductUuid::new().into_uuid(), "quantity": 1 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_zero_quantity_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::InvalidQuantity));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_uuid": ProductUuid::new().into_uuid(), "quantity": 0 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_negative_quantity_is_rejected_before_the_service() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_add_item().never();

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_uuid": ProductUuid::new().into_uuid(), "quantity": -2 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
