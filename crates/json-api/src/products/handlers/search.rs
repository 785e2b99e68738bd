//! Product Search Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    products::{errors::into_status_error, index::ProductPageResponse},
    state::State,
};

/// Product Search Handler
///
/// Case-insensitive name search. A blank query yields an empty page.
#[endpoint(
    tags("products"),
    summary = "Search Products",
    responses(
        (status_code = StatusCode::OK, description = "Page of matching products"),
        (status_code = StatusCode::NOT_FOUND, description = "Invalid page"),
    ),
)]
#[tracing::instrument(
    name = "products.search",
    skip(q, page, page_size, depot),
    fields(query_chars = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    page: QueryParam<String, false>,
    page_size: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = state
        .pagination
        .page_request(page.as_deref(), page_size.as_deref())?;

    let query = q.into_inner().unwrap_or_default();

    tracing::Span::current().record("query_chars", query.chars().count());

    let products = state
        .app
        .products
        .search_products(query, request)
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{
        pagination::{Page, PageRequest},
        products::{MockProductsService, ProductUuid},
    };

    use crate::test_helpers::{Mocks, make_product};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        Mocks {
            products,
            ..Mocks::default()
        }
        .public_service(Router::with_path("products/search").get(handler))
    }

    #[tokio::test]
    async fn test_search_forwards_decoded_query() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_search_products()
            .once()
            .withf(|query, page| query == "кубик" && *page == PageRequest::new(1, 5))
            .return_once(move |_, page| Ok(Page::new(vec![make_product(uuid)], 1, page)));

        let response: ProductPageResponse = TestClient::get(
            "http://example.com/products/search?q=%D0%BA%D1%83%D0%B1%D0%B8%D0%BA&page_size=5",
        )
        .send(&make_service(products))
        .await
        .take_json()
        .await?;

        assert_eq!(response.count, 1);
        assert_eq!(response.results.len(), 1, "one match");

        Ok(())
    }

    #[tokio::test]
    async fn test_search_without_query_passes_empty_string() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_search_products()
            .once()
            .withf(|query, _| query.is_empty())
            .return_once(|_, page| Ok(Page::new(vec![], 0, page)));

        let response: ProductPageResponse =
            TestClient::get("http://example.com/products/search")
                .send(&make_service(products))
                .await
                .take_json()
                .await?;

        assert_eq!(response.count, 0);
        assert_eq!(response.total_pages, 1);
        assert!(response.results.is_empty(), "no results");

        Ok(())
    }
}
