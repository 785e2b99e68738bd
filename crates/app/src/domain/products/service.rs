//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        categories::CategoryUuid,
        pagination::{Page, PageRequest, is_out_of_range},
        products::{
            FEATURED_PRODUCTS_LIMIT,
            data::{NewProduct, ProductFilter},
            errors::ProductsServiceError,
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
            search::SearchPatterns,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let total = self.repository.count_products(&mut tx, filter).await?;

        if is_out_of_range(page, total) {
            return Err(ProductsServiceError::PageOutOfRange);
        }

        let products = self.repository.list_products(&mut tx, filter, page).await?;

        tx.commit().await?;

        Ok(Page::new(products, total, page))
    }

    async fn list_category_products(
        &self,
        category: CategoryUuid,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        if !self.repository.category_is_active(&mut tx, category).await? {
            return Err(ProductsServiceError::CategoryNotFound);
        }

        let filter = ProductFilter {
            category: Some(category),
        };

        let total = self.repository.count_products(&mut tx, filter).await?;

        if is_out_of_range(page, total) {
            return Err(ProductsServiceError::PageOutOfRange);
        }

        let products = self.repository.list_products(&mut tx, filter, page).await?;

        tx.commit().await?;

        Ok(Page::new(products, total, page))
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn featured_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self
            .repository
            .featured_products(&mut tx, FEATURED_PRODUCTS_LIMIT)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn search_products(
        &self,
        query: String,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError> {
        let Some(patterns) = SearchPatterns::from_query(&query) else {
            if is_out_of_range(page, 0) {
                return Err(ProductsServiceError::PageOutOfRange);
            }

            return Ok(Page::new(Vec::new(), 0, page));
        };

        let mut tx = self.db.begin_transaction().await?;

        let total = self
            .repository
            .count_search_products(&mut tx, &patterns)
            .await?;

        if is_out_of_range(page, total) {
            return Err(ProductsServiceError::PageOutOfRange);
        }

        let products = self
            .repository
            .search_products(&mut tx, &patterns, page)
            .await?;

        tx.commit().await?;

        Ok(Page::new(products, total, page))
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if product.name.trim().is_empty() || product.slug.trim().is_empty() {
            return Err(ProductsServiceError::MissingRequiredData);
        }

        if product.price == 0 {
            return Err(ProductsServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Available products, newest first, optionally narrowed to one category.
    async fn list_products(
        &self,
        filter: ProductFilter,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError>;

    /// Available products of an active category.
    async fn list_category_products(
        &self,
        category: CategoryUuid,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single available product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Newest featured products.
    async fn featured_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Case-insensitive name search over available products.
    async fn search_products(
        &self,
        query: String,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;
}
