//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    auth::Principal,
    database::Db,
    domain::{
        carts::repositories::{PgCartItemsRepository, PgCartsRepository},
        orders::{
            data::NewOrder,
            errors::OrdersServiceError,
            records::{OrderRecord, OrderStatus, OrderUuid},
            repositories::{PgOrderItemsRepository, PgOrdersRepository},
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    carts_repository: PgCartsRepository,
    cart_items_repository: PgCartItemsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            carts_repository: PgCartsRepository::new(),
            cart_items_repository: PgCartItemsRepository::new(),
        }
    }

    async fn attach_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut orders: Vec<OrderRecord>,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        if orders.is_empty() {
            return Ok(orders);
        }

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let mut items = self.items_repository.get_order_items(tx, &uuids).await?;

        for order in &mut orders {
            order.items = items.remove(&order.uuid).unwrap_or_default();
        }

        Ok(orders)
    }

    async fn attach_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderRecord,
    ) -> Result<OrderRecord, OrdersServiceError> {
        self.attach_items(tx, vec![order])
            .await?
            .pop()
            .ok_or(OrdersServiceError::NotFound)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(
        &self,
        actor: Principal,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        if order.shipping_address.trim().is_empty() {
            return Err(OrdersServiceError::MissingShippingAddress);
        }

        if order.phone.trim().is_empty() {
            return Err(OrdersServiceError::MissingPhone);
        }

        let mut tx = self.db.begin_transaction().await?;

        let cart = self.carts_repository.ensure_cart(&mut tx, actor.user).await?;

        let lines = self
            .items_repository
            .get_checkout_lines(&mut tx, cart.uuid)
            .await?;

        if lines.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let total_price: u64 = lines.iter().map(|line| line.subtotal()).sum();

        let mut created = self
            .orders_repository
            .create_order(&mut tx, actor.user, &order, total_price)
            .await?;

        created.items = self
            .items_repository
            .create_order_items(&mut tx, created.uuid, &lines)
            .await?;

        self.cart_items_repository
            .clear_cart_items(&mut tx, cart.uuid)
            .await?;

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_status(
        &self,
        actor: Principal,
        order: OrderUuid,
        status: String,
    ) -> Result<OrderRecord, OrdersServiceError> {
        if !actor.is_staff {
            return Err(OrdersServiceError::PermissionDenied);
        }

        let status: OrderStatus = status
            .parse()
            .map_err(|_| OrdersServiceError::InvalidStatus)?;

        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .orders_repository
            .update_order_status(&mut tx, order, status)
            .await?;

        let updated = self.attach_order_items(&mut tx, updated).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn list_orders(&self, actor: Principal) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders = self
            .orders_repository
            .list_orders_by_user(&mut tx, actor.user)
            .await?;

        let orders = self.attach_items(&mut tx, orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn get_order(
        &self,
        actor: Principal,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let found = self.orders_repository.get_order(&mut tx, order).await?;

        if found.user_uuid != actor.user && !actor.is_staff {
            return Err(OrdersServiceError::NotFound);
        }

        let found = self.attach_order_items(&mut tx, found).await?;

        tx.commit().await?;

        Ok(found)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the caller's cart into an order and empty the cart, atomically.
    async fn create_order(
        &self,
        actor: Principal,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Overwrite an order's status. Staff only.
    async fn update_status(
        &self,
        actor: Principal,
        order: OrderUuid,
        status: String,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// The caller's orders, newest first.
    async fn list_orders(&self, actor: Principal) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// A single order owned by the caller, or any order for staff.
    async fn get_order(
        &self,
        actor: Principal,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;
}
