//! Featured Products Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FeaturedProductsResponse {
    pub products: Vec<ProductResponse>,
}

/// Featured Products Handler
///
/// Returns the newest featured products.
#[endpoint(tags("products"), summary = "Featured Products")]
#[tracing::instrument(name = "products.featured", skip(depot), err)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<FeaturedProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .featured_products()
        .await
        .map_err(into_status_error)?;

    Ok(Json(FeaturedProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::products::{MockProductsService, ProductUuid};

    use crate::test_helpers::{Mocks, make_product};

    use super::*;

    #[tokio::test]
    async fn test_featured_returns_products_in_service_order() -> TestResult {
        let newest = ProductUuid::new();
        let older = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_featured_products()
            .once()
            .return_once(move || Ok(vec![make_product(newest), make_product(older)]));

        let service = Mocks {
            products,
            ..Mocks::default()
        }
        .public_service(Router::with_path("products/featured").get(handler));

        let response: FeaturedProductsResponse =
            TestClient::get("http://example.com/products/featured")
                .send(&service)
                .await
                .take_json()
                .await?;

        let uuids: Vec<_> = response.products.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, vec![newest.into_uuid(), older.into_uuid()]);

        Ok(())
    }
}
