//! Category Products Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    extensions::*,
    products::{errors::into_status_error, index::ProductPageResponse},
    state::State,
};

/// Category Products Handler
///
/// Returns available products of an active category, newest first.
#[endpoint(
    tags("categories"),
    summary = "List Category Products",
    responses(
        (status_code = StatusCode::OK, description = "Page of products"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found or invalid page"),
    ),
)]
#[tracing::instrument(
    name = "categories.products",
    skip(category, page, page_size, depot),
    fields(category_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    category: PathParam<Uuid>,
    page: QueryParam<String, false>,
    page_size: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let category = category.into_inner();
    let request = state
        .pagination
        .page_request(page.as_deref(), page_size.as_deref())?;

    tracing::Span::current().record("category_uuid", tracing::field::display(category));

    let products = state
        .app
        .products
        .list_category_products(category.into(), request)
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
        pagination::{Page, PageRequest},
        products::{MockProductsService, ProductUuid, ProductsServiceError},
    };

    use crate::test_helpers::{Mocks, make_product};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        Mocks {
            products,
            ..Mocks::default()
        }
        .public_service(Router::with_path("categories/{category}/products").get(handler))
    }

    #[tokio::test]
    async fn test_category_products_returns_page() -> TestResult {
        let category = CategoryUuid::new();
        let product = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_list_category_products()
            .once()
            .withf(move |c, page| *c == category && *page == PageRequest::new(2, 1))
            .return_once(move |_, page| Ok(Page::new(vec![make_product(product)], 2, page)));

        let response: ProductPageResponse = TestClient::get(format!(
            "http://example.com/categories/{category}/products?page=2&page_size=1"
        ))
        .send(&make_service(products))
        .await
        .take_json()
        .await?;

        assert_eq!(response.page, 2);
        assert_eq!(response.total_pages, 2);
        assert_eq!(
            response.results.first().map(|p| p.uuid),
            Some(product.into_uuid())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_category_returns_404() -> TestResult {
        let category = CategoryUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_list_category_products()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::CategoryNotFound));

        let res = TestClient::get(format!(
            "http://example.com/categories/{category}/products"
        ))
        .send(&make_service(products))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
