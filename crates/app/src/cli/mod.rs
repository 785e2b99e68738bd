use clap::{Parser, Subcommand};
use sqlx::PgPool;
use storefront_app::database;

mod category;
mod db;
mod product;
mod token;
mod user;

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront administration CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    User(user::UserCommand),
    Token(token::TokenCommand),
    Category(category::CategoryCommand),
    Product(product::ProductCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::User(command) => user::run(command).await,
            Commands::Token(command) => token::run(command).await,
            Commands::Category(command) => category::run(command).await,
            Commands::Product(command) => product::run(command).await,
        }
    }
}

pub(crate) async fn connect(database_url: &str) -> Result<PgPool, String> {
    database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))
}
