//! Favorites service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::Principal,
    database::Db,
    domain::{
        favorites::{
            errors::FavoritesServiceError, records::FavoriteRecord,
            repository::PgFavoritesRepository,
        },
        products::ProductUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgFavoritesService {
    db: Db,
    repository: PgFavoritesRepository,
}

impl PgFavoritesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgFavoritesRepository::new(),
        }
    }
}

#[async_trait]
impl FavoritesService for PgFavoritesService {
    async fn list_favorites(
        &self,
        actor: Principal,
    ) -> Result<Vec<FavoriteRecord>, FavoritesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let favorites = self.repository.list_favorites(&mut tx, actor.user).await?;

        tx.commit().await?;

        Ok(favorites)
    }

    async fn toggle_favorite(
        &self,
        actor: Principal,
        product: ProductUuid,
    ) -> Result<bool, FavoritesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let removed = self
            .repository
            .delete_favorite(&mut tx, actor.user, product)
            .await?;

        let is_favorited = if removed > 0 {
            false
        } else {
            let inserted = self
                .repository
                .create_favorite(&mut tx, actor.user, product)
                .await?;

            // A concurrent toggle may have inserted the row first; the insert then skips it.
            if inserted == 0
                && !self
                    .repository
                    .product_is_available(&mut tx, product)
                    .await?
            {
                return Err(FavoritesServiceError::ProductNotFound);
            }

            true
        };

        tx.commit().await?;

        Ok(is_favorited)
    }

    async fn count_favorites(&self, actor: Principal) -> Result<u64, FavoritesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let count = self.repository.count_favorites(&mut tx, actor.user).await?;

        tx.commit().await?;

        Ok(count)
    }
}

#[automock]
#[async_trait]
pub trait FavoritesService: Send + Sync {
    /// The caller's favorites, most recent first.
    async fn list_favorites(
        &self,
        actor: Principal,
    ) -> Result<Vec<FavoriteRecord>, FavoritesServiceError>;

    /// Add or remove a favorite. Returns whether the product is now favorited.
    async fn toggle_favorite(
        &self,
        actor: Principal,
        product: ProductUuid,
    ) -> Result<bool, FavoritesServiceError>;

    /// Number of favorites the caller has.
    async fn count_favorites(&self, actor: Principal) -> Result<u64, FavoritesServiceError>;
}
