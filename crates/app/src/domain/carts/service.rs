//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    auth::Principal,
    database::Db,
    domain::carts::{
        data::NewCartItem,
        errors::CartsServiceError,
        records::{CartItemUuid, CartRecord},
        repositories::{PgCartItemsRepository, PgCartsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
        }
    }

    async fn load_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut cart: CartRecord,
    ) -> Result<CartRecord, CartsServiceError> {
        let items = self.items_repository.get_cart_items(tx, cart.uuid).await?;

        cart.items = items;

        Ok(cart)
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_or_create_cart(&self, actor: Principal) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self.carts_repository.ensure_cart(&mut tx, actor.user).await?;
        let cart = self.load_items(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn add_item(
        &self,
        actor: Principal,
        item: NewCartItem,
    ) -> Result<CartRecord, CartsServiceError> {
        if item.quantity < 1 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin_transaction().await?;

        let cart = self.carts_repository.ensure_cart(&mut tx, actor.user).await?;

        let stock = self
            .items_repository
            .get_available_product_stock(&mut tx, item.product_uuid)
            .await?
            .ok_or(CartsServiceError::ProductNotFound)?;

        if item.quantity > stock {
            return Err(CartsServiceError::InsufficientStock {
                requested: u64::from(item.quantity),
                available: stock,
            });
        }

        self.items_repository
            .upsert_cart_item(&mut tx, cart.uuid, item)
            .await?;

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        let cart = self.load_items(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn update_item(
        &self,
        actor: Principal,
        item: CartItemUuid,
        quantity: i64,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self.carts_repository.ensure_cart(&mut tx, actor.user).await?;

        if quantity <= 0 {
            let rows_affected = self
                .items_repository
                .delete_cart_item(&mut tx, cart.uuid, item)
                .await?;

            if rows_affected == 0 {
                return Err(CartsServiceError::NotFound);
            }
        } else {
            let stock = self
                .items_repository
                .get_cart_item_stock(&mut tx, cart.uuid, item)
                .await?;

            let requested = quantity.unsigned_abs();

            let quantity = u32::try_from(quantity)
                .ok()
                .filter(|quantity| *quantity <= stock)
                .ok_or(CartsServiceError::InsufficientStock {
                    requested,
                    available: stock,
                })?;

            self.items_repository
                .update_cart_item_quantity(&mut tx, cart.uuid, item, quantity)
                .await?;
        }

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        let cart = self.load_items(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn remove_item(
        &self,
        actor: Principal,
        item: CartItemUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self.carts_repository.ensure_cart(&mut tx, actor.user).await?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, cart.uuid, item)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        let cart = self.load_items(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn clear(&self, actor: Principal) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self.carts_repository.ensure_cart(&mut tx, actor.user).await?;

        let removed = self
            .items_repository
            .clear_cart_items(&mut tx, cart.uuid)
            .await?;

        if removed > 0 {
            self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;
        }

        tx.commit().await?;

        Ok(cart)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The caller's cart, created empty on first access.
    async fn get_or_create_cart(&self, actor: Principal) -> Result<CartRecord, CartsServiceError>;

    /// Add a product, merging into an existing line for the same product.
    async fn add_item(
        &self,
        actor: Principal,
        item: NewCartItem,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Replace a line's quantity. A quantity of zero or less removes the line.
    async fn update_item(
        &self,
        actor: Principal,
        item: CartItemUuid,
        quantity: i64,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Remove a line from the caller's cart.
    async fn remove_item(
        &self,
        actor: Principal,
        item: CartItemUuid,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Remove every line from the caller's cart.
    async fn clear(&self, actor: Principal) -> Result<CartRecord, CartsServiceError>;
}
