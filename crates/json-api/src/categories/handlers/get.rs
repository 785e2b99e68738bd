//! Get Category Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::categories::CategoryRecord;

use crate::{categories::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    pub uuid: Uuid,

    pub name: String,

    pub description: String,

    pub slug: String,

    pub image_url: Option<String>,

    /// Number of available products in the category
    pub products_count: u64,

    pub created_at: String,

    pub updated_at: String,
}

impl From<CategoryRecord> for CategoryResponse {
    fn from(category: CategoryRecord) -> Self {
        CategoryResponse {
            uuid: category.uuid.into(),
            name: category.name,
            description: category.description,
            slug: category.slug,
            image_url: category.image_url,
            products_count: category.products_count,
            created_at: category.created_at.to_string(),
            updated_at: category.updated_at.to_string(),
        }
    }
}

/// Get Category Handler
#[endpoint(
    tags("categories"),
    summary = "Get Category",
    responses(
        (status_code = StatusCode::OK, description = "Category found"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
    ),
)]
#[tracing::instrument(
    name = "categories.get",
    skip(category, depot),
    fields(category_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    category: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let category = category.into_inner();

    tracing::Span::current().record("category_uuid", tracing::field::display(category));

    let category = state
        .app
        .categories
        .get_category(category.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(category.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::categories::{
        CategoriesServiceError, CategoryUuid, MockCategoriesService,
    };

    use crate::test_helpers::{Mocks, make_category};

    use super::*;

    fn make_service(categories: MockCategoriesService) -> Service {
        Mocks {
            categories,
            ..Mocks::default()
        }
        .public_service(Router::with_path("categories/{category}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_category_with_count() -> TestResult {
        let uuid = CategoryUuid::new();
        let mut categories = MockCategoriesService::new();

        categories
            .expect_get_category()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(move |_| Ok(make_category(uuid)));

        let response: CategoryResponse =
            TestClient::get(format!("http://example.com/categories/{uuid}"))
                .send(&make_service(categories))
                .await
                .take_json()
                .await?;

        assert_eq!(response.uuid, uuid.into_uuid());
        assert_eq!(response.products_count, 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_inactive_category_returns_404() -> TestResult {
        let uuid = CategoryUuid::new();
        let mut categories = MockCategoriesService::new();

        categories
            .expect_get_category()
            .once()
            .return_once(|_| Err(CategoriesServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/categories/{uuid}"))
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
