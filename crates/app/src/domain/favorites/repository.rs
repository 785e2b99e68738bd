//! Favorites Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    favorites::records::{FavoriteRecord, FavoriteUuid},
    products::{ProductRecord, ProductUuid},
    users::UserUuid,
};

const LIST_FAVORITES_SQL: &str = include_str!("sql/list_favorites.sql");
const CREATE_FAVORITE_SQL: &str = include_str!("sql/create_favorite.sql");
const DELETE_FAVORITE_SQL: &str = include_str!("sql/delete_favorite.sql");
const COUNT_FAVORITES_SQL: &str = include_str!("sql/count_favorites.sql");
const PRODUCT_IS_AVAILABLE_SQL: &str = include_str!("sql/product_is_available.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgFavoritesRepository;

impl PgFavoritesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_favorites(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<FavoriteRecord>, sqlx::Error> {
        query_as::<Postgres, FavoriteRecord>(LIST_FAVORITES_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Favorite an available product. Returns rows inserted, zero when the product is missing
    /// or unavailable or already favorited.
    pub(crate) async fn create_favorite(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CREATE_FAVORITE_SQL)
            .bind(FavoriteUuid::new().into_uuid())
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_favorite(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_FAVORITE_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn product_is_available(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(PRODUCT_IS_AVAILABLE_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn count_favorites(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let count = query_scalar::<Postgres, i64>(COUNT_FAVORITES_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }
}

impl<'r> FromRow<'r, PgRow> for FavoriteRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: FavoriteUuid::from_uuid(row.try_get("favorite_uuid")?),
            product: ProductRecord::from_row(row)?,
            created_at: row.try_get::<SqlxTimestamp, _>("favorited_at")?.to_jiff(),
        })
    }
}
