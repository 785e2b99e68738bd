//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        categories::{CategoriesService, PgCategoriesService},
        favorites::{FavoritesService, PgFavoritesService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub users: Arc<dyn UsersService>,
    pub categories: Arc<dyn CategoriesService>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub favorites: Arc<dyn FavoritesService>,
    pub orders: Arc<dyn OrdersService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool.clone());

        Ok(Self {
            auth: Arc::new(PgAuthService::new(pool.clone())),
            users: Arc::new(PgUsersService::new(pool)),
            categories: Arc::new(PgCategoriesService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            favorites: Arc::new(PgFavoritesService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db)),
        })
    }
}
