//! Per-test PostgreSQL databases on a shared container.

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::{OnceCell, mpsc};
use uuid::Uuid;

const DB_USER: &str = "storefront_test";
const DB_PASSWORD: &str = "storefront_test_password";

/// glibc-based image so `ILIKE` folds non-ASCII letters.
const POSTGRES_TAG: &str = "17";

/// Shared PostgreSQL container, started on first use.
static POSTGRES_CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> = Lazy::new(OnceCell::new);

/// Names of databases waiting to be dropped.
static DROP_SENDER: Lazy<OnceCell<mpsc::UnboundedSender<String>>> = Lazy::new(OnceCell::new);

/// Database names are interpolated into DDL, so only allow a conservative identifier shape.
fn is_safe_database_name(name: &str) -> bool {
    let mut chars = name.chars();

    let starts_well = chars
        .next()
        .is_some_and(|first| first.is_ascii_lowercase() || first == '_');

    starts_well
        && name.len() <= 63
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

async fn start_postgres() -> ContainerAsync<PostgresImage> {
    PostgresImage::default()
        .with_user(DB_USER)
        .with_password(DB_PASSWORD)
        .with_db_name("storefront_test")
        .with_tag(POSTGRES_TAG)
        .start()
        .await
        .expect("Failed to start PostgreSQL container")
}

async fn server_url(database: &str) -> String {
    let container = POSTGRES_CONTAINER.get_or_init(start_postgres).await;

    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get container port");

    let host =
        std::env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_string());

    format!("postgresql://{DB_USER}:{DB_PASSWORD}@{host}:{port}/{database}")
}

async fn start_drop_task() -> mpsc::UnboundedSender<String> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        while let Some(name) = receiver.recv().await {
            if let Err(error) = drop_database(&name).await {
                eprintln!("Failed to drop test database '{name}': {error}");
            }
        }
    });

    sender
}

async fn drop_database(name: &str) -> Result<(), sqlx::Error> {
    if POSTGRES_CONTAINER.get().is_none() || !is_safe_database_name(name) {
        return Ok(());
    }

    let mut conn = PgConnection::connect(&server_url("postgres").await).await?;

    sqlx::query(&format!("DROP DATABASE IF EXISTS \"{name}\" WITH (FORCE)"))
        .execute(&mut conn)
        .await?;

    conn.close().await
}

/// A freshly migrated database that is dropped once the handle goes away.
///
/// Services commit their own transactions, so isolation comes from every test owning a
/// separate database rather than from rolling back.
#[derive(Debug)]
pub struct TestDb {
    pool: PgPool,
    pub name: String,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if let Some(sender) = DROP_SENDER.get() {
            let _ = sender.send(self.name.clone());
        }
    }
}

impl TestDb {
    pub async fn new() -> Self {
        DROP_SENDER.get_or_init(start_drop_task).await;

        let name = format!("storefront_test_{}", Uuid::now_v7().simple());

        assert!(is_safe_database_name(&name), "unsafe database name {name}");

        let mut admin = PgConnection::connect(&server_url("postgres").await)
            .await
            .expect("Failed to connect to postgres database");

        sqlx::query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut admin)
            .await
            .expect("Failed to create test database");

        admin
            .close()
            .await
            .expect("Failed to close admin connection");

        let pool = PgPool::connect(&server_url(&name).await)
            .await
            .expect("Failed to create pool for test database");

        crate::database::migrate(&pool)
            .await
            .expect("Failed to run migrations on test database");

        Self { pool, name }
    }

    /// Returns the connection pool for this test database.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_names_are_safe() {
        let name = format!("storefront_test_{}", Uuid::now_v7().simple());

        assert!(is_safe_database_name(&name));
    }

    #[test]
    fn unsafe_names_are_rejected() {
        assert!(!is_safe_database_name(""));
        assert!(!is_safe_database_name("1starts_with_digit"));
        assert!(!is_safe_database_name("has-hyphen"));
        assert!(!is_safe_database_name("quote\"d"));
        assert!(!is_safe_database_name(&"a".repeat(64)));
    }

    #[tokio::test]
    async fn new_database_is_migrated() {
        let test_db = TestDb::new().await;

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_schema = 'public' AND table_name IN ('carts', 'orders', 'products')",
        )
        .fetch_one(test_db.pool())
        .await
        .expect("Failed to query information_schema");

        assert_eq!(tables, 3);
    }
}
