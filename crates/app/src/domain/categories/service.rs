//! Categories service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::categories::{
        data::NewCategory,
        errors::CategoriesServiceError,
        records::{CategoryRecord, CategoryUuid},
        repository::PgCategoriesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCategoriesService {
    db: Db,
    repository: PgCategoriesRepository,
}

impl PgCategoriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCategoriesRepository::new(),
        }
    }
}

#[async_trait]
impl CategoriesService for PgCategoriesService {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn get_category(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let category = self.repository.get_category(&mut tx, category).await?;

        tx.commit().await?;

        Ok(category)
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        if category.name.trim().is_empty() || category.slug.trim().is_empty() {
            return Err(CategoriesServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_category(&mut tx, category).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Active categories ordered by name, with available product counts.
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError>;

    /// Retrieve a single active category.
    async fn get_category(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Creates a new category.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::new_category};

    use super::*;

    #[tokio::test]
    async fn list_categories_orders_by_name_and_skips_inactive() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.categories
            .create_category(new_category("Toys", "toys"))
            .await?;
        ctx.categories
            .create_category(new_category("Books", "books"))
            .await?;
        ctx.categories
            .create_category(NewCategory {
                is_active: false,
                ..new_category("Archive", "archive")
            })
            .await?;

        let categories = ctx.categories.list_categories().await?;
        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names, ["Books", "Toys"]);

        Ok(())
    }

    #[tokio::test]
    async fn products_count_only_includes_available_products() -> TestResult {
        let ctx = TestContext::new().await;
        let category = ctx.create_category("games").await;

        ctx.create_product(category.uuid, "Chess", 1_500, 3).await;
        ctx.create_product(category.uuid, "Go", 2_500, 1).await;
        ctx.create_unavailable_product(category.uuid, "Checkers", 900)
            .await;

        let fetched = ctx.categories.get_category(category.uuid).await?;

        assert_eq!(fetched.products_count, 2);
        assert_eq!(category.products_count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn get_category_inactive_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let category = ctx
            .categories
            .create_category(NewCategory {
                is_active: false,
                ..new_category("Hidden", "hidden")
            })
            .await?;

        let result = ctx.categories.get_category(category.uuid).await;

        assert!(
            matches!(result, Err(CategoriesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_category_duplicate_slug_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.categories
            .create_category(new_category("Music", "music"))
            .await?;

        let result = ctx
            .categories
            .create_category(new_category("More Music", "music"))
            .await;

        assert!(matches!(result, Err(CategoriesServiceError::AlreadyExists)));

        Ok(())
    }

    #[tokio::test]
    async fn create_category_blank_name_returns_missing_required_data() {
        let ctx = TestContext::new().await;

        let result = ctx
            .categories
            .create_category(new_category("  ", "blank"))
            .await;

        assert!(matches!(
            result,
            Err(CategoriesServiceError::MissingRequiredData)
        ));
    }
}
