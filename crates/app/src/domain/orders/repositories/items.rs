//! Order Items Repository

use std::collections::HashMap;

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{to_db_amount, try_get_amount, try_get_count},
    domain::{
        carts::CartUuid,
        orders::records::{OrderItemRecord, OrderItemUuid, OrderUuid},
        products::ProductUuid,
    },
};

const GET_CHECKOUT_LINES_SQL: &str = include_str!("../sql/get_checkout_lines.sql");
const CREATE_ORDER_ITEMS_SQL: &str = include_str!("../sql/create_order_items.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_order_items.sql");

/// A cart line priced at checkout time.
#[derive(Debug, Clone)]
pub(crate) struct CheckoutLine {
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: u64,
}

impl CheckoutLine {
    pub(crate) fn subtotal(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Cart lines with current product names and prices, share-locking the products.
    pub(crate) async fn get_checkout_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<CheckoutLine>, sqlx::Error> {
        query_as::<Postgres, CheckoutLine>(GET_CHECKOUT_LINES_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        lines: &[CheckoutLine],
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        let items: Vec<OrderItemRecord> = lines
            .iter()
            .map(|line| OrderItemRecord {
                uuid: OrderItemUuid::new(),
                product_uuid: Some(line.product_uuid),
                product_name: line.product_name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
            .collect();

        let mut uuids = Vec::with_capacity(items.len());
        let mut product_uuids = Vec::with_capacity(items.len());
        let mut product_names = Vec::with_capacity(items.len());
        let mut quantities = Vec::with_capacity(items.len());
        let mut unit_prices = Vec::with_capacity(items.len());

        for (item, line) in items.iter().zip(lines) {
            uuids.push(item.uuid.into_uuid());
            product_uuids.push(line.product_uuid.into_uuid());
            product_names.push(line.product_name.clone());
            quantities.push(i32::try_from(line.quantity).map_err(|e| {
                sqlx::Error::ColumnDecode {
                    index: "quantity".to_string(),
                    source: Box::new(e),
                }
            })?);
            unit_prices.push(to_db_amount(line.unit_price, "unit_price")?);
        }

        query(CREATE_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .bind(uuids)
            .bind(product_uuids)
            .bind(product_names)
            .bind(quantities)
            .bind(unit_prices)
            .execute(&mut **tx)
            .await?;

        Ok(items)
    }

    /// Line items for the given orders, grouped by order.
    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<HashMap<OrderUuid, Vec<OrderItemRecord>>, sqlx::Error> {
        let order_uuids: Vec<Uuid> = orders.iter().map(|order| order.into_uuid()).collect();

        let rows = query(GET_ORDER_ITEMS_SQL)
            .bind(order_uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut grouped: HashMap<OrderUuid, Vec<OrderItemRecord>> = HashMap::new();

        for row in rows {
            let order = OrderUuid::from_uuid(row.try_get("order_uuid")?);

            grouped
                .entry(order)
                .or_default()
                .push(OrderItemRecord::from_row(&row)?);
        }

        Ok(grouped)
    }
}

impl<'r> FromRow<'r, PgRow> for CheckoutLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            quantity: try_get_count(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: row
                .try_get::<Option<Uuid>, _>("product_uuid")?
                .map(ProductUuid::from_uuid),
            product_name: row.try_get("product_name")?,
            quantity: try_get_count(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
        })
    }
}
