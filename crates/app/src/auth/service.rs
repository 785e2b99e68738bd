//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::{
    auth::{
        ApiTokenMetadata, ApiTokenVersion, AuthServiceError, IssuedApiToken, NewApiToken,
        Principal, build_verifier_input, format_api_token, generate_api_token_secret,
        hash_verifier_input, parse_api_token, repository::PgAuthRepository,
    },
    domain::users::UserUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new API token for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insertion fails.
    pub async fn issue_api_token(
        &self,
        user: UserUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid, version, &secret);

        let token_hash =
            hash_verifier_input(&build_verifier_input(&token_uuid, version, &user, &secret));

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token_uuid,
                user_uuid: user,
                version,
                token_hash,
                expires_at,
            })
            .await?;

        Ok(IssuedApiToken { token, metadata })
    }

    /// List all tokens for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        user: UserUuid,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        self.repository
            .list_api_tokens_by_user(user)
            .await
            .map_err(AuthServiceError::from)
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, token_uuid: Uuid) -> Result<bool, AuthServiceError> {
        self.repository
            .revoke_api_token(token_uuid)
            .await
            .map(|record| record.is_some())
            .map_err(AuthServiceError::from)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError> {
        let parsed_token = parse_api_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let token = self
            .repository
            .find_active_api_token_by_uuid(parsed_token.token_uuid, parsed_token.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if token.version != parsed_token.version {
            return Err(AuthServiceError::NotFound);
        }

        let expected_hash = hash_verifier_input(&build_verifier_input(
            &parsed_token.token_uuid,
            parsed_token.version,
            &token.user_uuid,
            &parsed_token.secret,
        ));

        if expected_hash != token.token_hash {
            return Err(AuthServiceError::NotFound);
        }

        // Best-effort metadata update; auth success should not depend on this write.
        if let Err(error) = self
            .repository
            .touch_api_token_last_used(parsed_token.token_uuid)
            .await
        {
            debug!(%error, "failed to record api token usage");
        }

        Ok(Principal {
            user: token.user_uuid,
            is_staff: token.is_staff,
        })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token into the calling principal.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, ToSpan};
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn issued_token_authenticates_as_owner() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("owner@example.com", false).await;

        let issued = ctx.auth.issue_api_token(user.uuid, None).await?;
        let principal = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(principal.user, user.uuid);
        assert!(!principal.is_staff);
        assert_eq!(issued.metadata.user_uuid, user.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn staff_flag_is_carried_into_principal() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("staff@example.com", true).await;

        let issued = ctx.auth.issue_api_token(user.uuid, None).await?;
        let principal = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert!(principal.is_staff);

        Ok(())
    }

    #[tokio::test]
    async fn tampered_secret_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("tamper@example.com", false).await;

        let issued = ctx.auth.issue_api_token(user.uuid, None).await?;
        let (prefix, secret) = issued.token.split_once('.').ok_or("malformed token")?;
        let flipped = if secret.starts_with('0') { "1" } else { "0" };
        let tampered = format!("{prefix}.{flipped}{}", &secret[1..]);

        let result = ctx.auth.authenticate_bearer(&tampered).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn revoked_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("revoked@example.com", false).await;

        let issued = ctx.auth.issue_api_token(user.uuid, None).await?;

        assert!(ctx.auth.revoke_api_token(issued.metadata.uuid).await?);
        assert!(!ctx.auth.revoke_api_token(issued.metadata.uuid).await?);

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn expired_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("expired@example.com", false).await;

        let expires_at = Timestamp::now().checked_sub(1.hour())?;
        let issued = ctx.auth.issue_api_token(user.uuid, Some(expires_at)).await?;

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.authenticate_bearer("not-a-token").await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));
    }

    #[tokio::test]
    async fn list_api_tokens_returns_only_users_tokens() -> TestResult {
        let ctx = TestContext::new().await;
        let alice = ctx.create_user("alice@example.com", false).await;
        let bob = ctx.create_user("bob@example.com", false).await;

        ctx.auth.issue_api_token(alice.uuid, None).await?;
        ctx.auth.issue_api_token(alice.uuid, None).await?;
        ctx.auth.issue_api_token(bob.uuid, None).await?;

        let tokens = ctx.auth.list_api_tokens(alice.uuid).await?;

        assert_eq!(tokens.len(), 2);
        assert!(tokens.iter().all(|token| token.user_uuid == alice.uuid));

        Ok(())
    }
}
