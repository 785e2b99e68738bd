//! Cart Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::{try_get_amount, try_get_count},
    domain::{
        carts::{
            data::NewCartItem,
            records::{CartItemRecord, CartItemUuid, CartProduct, CartUuid},
        },
        products::ProductUuid,
    },
};

const GET_CART_ITEMS_SQL: &str = include_str!("../sql/get_cart_items.sql");
const GET_AVAILABLE_PRODUCT_STOCK_SQL: &str = include_str!("../sql/get_available_product_stock.sql");
const GET_CART_ITEM_STOCK_SQL: &str = include_str!("../sql/get_cart_item_stock.sql");
const UPSERT_CART_ITEM_SQL: &str = include_str!("../sql/upsert_cart_item.sql");
const UPDATE_CART_ITEM_QUANTITY_SQL: &str = include_str!("../sql/update_cart_item_quantity.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");
const CLEAR_CART_ITEMS_SQL: &str = include_str!("../sql/clear_cart_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(GET_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Stock of an available product, or `None` when it is missing or unavailable.
    pub(crate) async fn get_available_product_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<u32>, sqlx::Error> {
        let stock = query_scalar::<Postgres, i32>(GET_AVAILABLE_PRODUCT_STOCK_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(stock.map(|stock| u32::try_from(stock).unwrap_or_default()))
    }

    /// Current stock of the product on a line of the given cart.
    pub(crate) async fn get_cart_item_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: CartItemUuid,
    ) -> Result<u32, sqlx::Error> {
        let stock = query_scalar::<Postgres, i32>(GET_CART_ITEM_STOCK_SQL)
            .bind(item.into_uuid())
            .bind(cart.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(u32::try_from(stock).unwrap_or_default())
    }

    /// Insert a line, or add to the quantity of the existing line for the same product.
    pub(crate) async fn upsert_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: NewCartItem,
    ) -> Result<CartItemUuid, sqlx::Error> {
        let quantity = i32::try_from(item.quantity).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        let uuid = query_scalar::<Postgres, Uuid>(UPSERT_CART_ITEM_SQL)
            .bind(CartItemUuid::new().into_uuid())
            .bind(cart.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(quantity)
            .fetch_one(&mut **tx)
            .await?;

        Ok(CartItemUuid::from_uuid(uuid))
    }

    pub(crate) async fn update_cart_item_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let quantity = i32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        let rows_affected = query(UPDATE_CART_ITEM_QUANTITY_SQL)
            .bind(item.into_uuid())
            .bind(cart.into_uuid())
            .bind(quantity)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: CartItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            product: CartProduct {
                uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
                name: row.try_get("product_name")?,
                slug: row.try_get("product_slug")?,
                price: try_get_amount(row, "product_price")?,
                stock: try_get_count(row, "product_stock")?,
                image_url: row.try_get("product_image_url")?,
                is_available: row.try_get("product_is_available")?,
            },
            quantity: try_get_count(row, "quantity")?,
            added_at: row.try_get::<SqlxTimestamp, _>("added_at")?.to_jiff(),
        })
    }
}
