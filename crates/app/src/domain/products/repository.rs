//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::{to_db_amount, try_get_amount, try_get_count},
    domain::{
        categories::CategoryUuid,
        pagination::PageRequest,
        products::{
            data::{NewProduct, ProductFilter},
            records::{ProductCategory, ProductRecord, ProductUuid},
            search::SearchPatterns,
        },
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const FEATURED_PRODUCTS_SQL: &str = include_str!("sql/featured_products.sql");
const SEARCH_PRODUCTS_SQL: &str = include_str!("sql/search_products.sql");
const COUNT_SEARCH_PRODUCTS_SQL: &str = include_str!("sql/count_search_products.sql");
const CATEGORY_IS_ACTIVE_SQL: &str = include_str!("sql/category_is_active.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: ProductFilter,
        page: PageRequest,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(filter.category.map(CategoryUuid::into_uuid))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: ProductFilter,
    ) -> Result<u64, sqlx::Error> {
        let count = query_scalar::<Postgres, i64>(COUNT_PRODUCTS_SQL)
            .bind(filter.category.map(CategoryUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn featured_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: i64,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(FEATURED_PRODUCTS_SQL)
            .bind(limit)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn search_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        patterns: &SearchPatterns,
        page: PageRequest,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(SEARCH_PRODUCTS_SQL)
            .bind(&patterns.contains)
            .bind(&patterns.starts_with)
            .bind(patterns.token_patterns())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_search_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        patterns: &SearchPatterns,
    ) -> Result<u64, sqlx::Error> {
        let count = query_scalar::<Postgres, i64>(COUNT_SEARCH_PRODUCTS_SQL)
            .bind(&patterns.contains)
            .bind(&patterns.starts_with)
            .bind(patterns.token_patterns())
            .fetch_one(&mut **tx)
            .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    pub(crate) async fn category_is_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(CATEGORY_IS_ACTIVE_SQL)
            .bind(category.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        let price = to_db_amount(product.price, "price")?;

        let stock = i32::try_from(product.stock).map_err(|e| sqlx::Error::ColumnDecode {
            index: "stock".to_string(),
            source: Box::new(e),
        })?;

        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.category_uuid.into_uuid())
            .bind(product.name.trim())
            .bind(product.description)
            .bind(product.slug.trim())
            .bind(price)
            .bind(stock)
            .bind(product.image_url)
            .bind(product.is_available)
            .bind(product.is_featured)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            category: ProductCategory {
                uuid: CategoryUuid::from_uuid(row.try_get::<Uuid, _>("category_uuid")?),
                name: row.try_get("category_name")?,
                slug: row.try_get("category_slug")?,
            },
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            slug: row.try_get("slug")?,
            price: try_get_amount(row, "price")?,
            stock: try_get_count(row, "stock")?,
            image_url: row.try_get("image_url")?,
            is_available: row.try_get("is_available")?,
            is_featured: row.try_get("is_featured")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
