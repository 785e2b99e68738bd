use clap::Args;
use jiff::Timestamp;
use storefront_app::{auth::PgAuthService, domain::users::UserUuid};
use uuid::Uuid;

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// User UUID that should own the token
    #[arg(long)]
    user_uuid: Uuid,

    /// Optional token expiration timestamp (RFC 3339)
    #[arg(long)]
    token_expires_at: Option<Timestamp>,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    if let Some(expires_at) = args.token_expires_at
        && expires_at <= Timestamp::now()
    {
        return Err("token-expires-at must be in the future".to_string());
    }

    let pool = connect(&args.database_url).await?;

    let issued = PgAuthService::new(pool)
        .issue_api_token(UserUuid::from_uuid(args.user_uuid), args.token_expires_at)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("token_uuid: {}", issued.metadata.uuid);
    println!("user_uuid: {}", issued.metadata.user_uuid);
    println!("token_version: {}", issued.metadata.version.as_i16());
    println!("token_created_at: {}", issued.metadata.created_at);
    if let Some(expires_at) = issued.metadata.expires_at {
        println!("token_expires_at: {expires_at}");
    }
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
