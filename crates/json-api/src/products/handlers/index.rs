//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::{
    pagination::Page,
    products::{ProductFilter, ProductRecord},
};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// One page of products
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductPageResponse {
    /// Total number of matching products
    pub count: u64,

    pub page: u32,

    pub page_size: u32,

    pub total_pages: u64,

    pub results: Vec<ProductResponse>,
}

impl From<Page<ProductRecord>> for ProductPageResponse {
    fn from(page: Page<ProductRecord>) -> Self {
        ProductPageResponse {
            count: page.total,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages(),
            results: page.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Product Index Handler
///
/// Returns available products, newest first. A `category` that is not a UUID is ignored.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Page of products"),
        (status_code = StatusCode::NOT_FOUND, description = "Invalid page"),
    ),
)]
#[tracing::instrument(
    name = "products.index",
    skip(category, page, page_size, depot),
    fields(
        category_uuid = tracing::field::Empty,
        page = tracing::field::Empty,
        page_size = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    page: QueryParam<String, false>,
    page_size: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = state
        .pagination
        .page_request(page.as_deref(), page_size.as_deref())?;

    let filter = ProductFilter {
        category: category
            .as_deref()
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
            .map(Into::into),
    };

    let span = tracing::Span::current();

    if let Some(category) = filter.category {
        span.record("category_uuid", tracing::field::display(category));
    }

    span.record("page", request.page);
    span.record("page_size", request.page_size);

    let products = state
        .app
        .products
        .list_products(filter, request)
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{
        categories::CategoryUuid,
        pagination::PageRequest,
        products::{MockProductsService, ProductUuid, ProductsServiceError},
    };

    use crate::test_helpers::{Mocks, make_product};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        Mocks {
            products,
            ..Mocks::default()
        }
        .public_service(Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_paginated_envelope() -> TestResult {
        let first = ProductUuid::new();
        let second = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|filter, page| {
                *filter == ProductFilter::default() && *page == PageRequest::new(1, 10)
            })
            .return_once(move |_, page| {
                Ok(Page::new(
                    vec![make_product(first), make_product(second)],
                    12,
                    page,
                ))
            });

        let response: ProductPageResponse = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        assert_eq!(response.count, 12);
        assert_eq!(response.page, 1);
        assert_eq!(response.page_size, 10);
        assert_eq!(response.total_pages, 2);

        let uuids: Vec<Uuid> = response.results.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, vec![first.into_uuid(), second.into_uuid()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_category_and_page_query() -> TestResult {
        let category = CategoryUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(move |filter, page| {
                filter.category == Some(category) && *page == PageRequest::new(3, 100)
            })
            .return_once(|_, page| Ok(Page::new(vec![], 250, page)));

        let res = TestClient::get(format!(
            "http://example.com/products?category={category}&page=3&page_size=1000"
        ))
        .send(&make_service(products))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_ignores_malformed_category() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|filter, _| filter.category.is_none())
            .return_once(|_, page| Ok(Page::new(vec![], 0, page)));

        let response: ProductPageResponse =
            TestClient::get("http://example.com/products?category=puzzles")
                .send(&make_service(products))
                .await
                .take_json()
                .await?;

        assert_eq!(response.count, 0);
        assert!(response.results.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_page_zero_returns_404() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_list_products().never();

        let res = TestClient::get("http://example.com/products?page=0")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_page_past_the_end_returns_404() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::PageOutOfRange));

        let res = TestClient::get("http://example.com/products?page=9")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
