use clap::Args;
use storefront_app::{
    auth::PgAuthService,
    domain::users::{NewUser, PgUsersService, UserUuid, UsersService},
};
use uuid::Uuid;

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Login email, unique across users
    #[arg(long)]
    email: String,

    /// Display name
    #[arg(long, default_value = "")]
    full_name: String,

    /// Grant staff privileges
    #[arg(long)]
    staff: bool,

    /// Optional user UUID; generated when omitted
    #[arg(long)]
    user_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let pool = connect(&args.database_url).await?;

    let user = PgUsersService::new(pool.clone())
        .create_user(NewUser {
            uuid: args.user_uuid.map_or_else(UserUuid::new, UserUuid::from_uuid),
            email: args.email,
            full_name: args.full_name,
            is_staff: args.staff,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    let issued = PgAuthService::new(pool)
        .issue_api_token(user.uuid, None)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("email: {}", user.email);
    println!("is_staff: {}", user.is_staff);
    println!("token_uuid: {}", issued.metadata.uuid);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
