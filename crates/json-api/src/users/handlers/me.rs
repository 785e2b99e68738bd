//! Current User Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::users::UserRecord;

use crate::{extensions::*, state::State, users::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,

    pub email: String,

    pub full_name: String,

    pub is_staff: bool,

    pub created_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            uuid: user.uuid.into(),
            email: user.email,
            full_name: user.full_name,
            is_staff: user.is_staff,
            created_at: user.created_at.to_string(),
        }
    }
}

/// Current User Handler
///
/// Returns the authenticated caller.
#[endpoint(
    tags("users"),
    summary = "Current User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Authenticated user"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
#[tracing::instrument(name = "users.me", skip(depot), err)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let user = state
        .app
        .users
        .get_user(principal.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::users::{MockUsersService, UserRecord};

    use crate::test_helpers::{Mocks, TEST_USER_UUID};

    use super::*;

    #[tokio::test]
    async fn test_me_returns_authenticated_user() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_get_user()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|uuid| {
                Ok(UserRecord {
                    uuid,
                    email: "ada@example.com".to_owned(),
                    full_name: "Ada Lovelace".to_owned(),
                    is_staff: false,
                    created_at: Timestamp::UNIX_EPOCH,
                    updated_at: Timestamp::UNIX_EPOCH,
                })
            });

        let service = Mocks {
            users,
            ..Mocks::default()
        }
        .customer_service(Router::with_path("users/me").get(handler));

        let response: UserResponse = TestClient::get("http://example.com/users/me")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(response.uuid, TEST_USER_UUID.into_uuid());
        assert_eq!(response.email, "ada@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_me_without_principal_returns_401() -> TestResult {
        let mut users = MockUsersService::new();

        users.expect_get_user().never();

        let service = Mocks {
            users,
            ..Mocks::default()
        }
        .public_service(Router::with_path("users/me").get(handler));

        let res = TestClient::get("http://example.com/users/me")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
