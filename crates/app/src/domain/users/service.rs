//! Users service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::domain::users::{
    data::NewUser,
    errors::UsersServiceError,
    records::{UserRecord, UserUuid},
    repository::PgUsersRepository,
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgUsersRepository::new(pool),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        if user.email.trim().is_empty() {
            return Err(UsersServiceError::MissingRequiredData);
        }

        self.repository.create_user(user).await.map_err(Into::into)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        self.repository.get_user(user).await.map_err(Into::into)
    }
}

#[automock]
#[async_trait]
/// User persistence operations.
///
/// Users are provisioned by the identity collaborator; the HTTP surface only reads them.
pub trait UsersService: Send + Sync {
    /// Creates a new user.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;
}
