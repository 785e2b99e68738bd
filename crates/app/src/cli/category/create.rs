use clap::Args;
use storefront_app::{
    database::Db,
    domain::categories::{CategoriesService, CategoryUuid, NewCategory, PgCategoriesService},
};

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct CreateCategoryArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[arg(long)]
    name: String,

    /// URL slug, unique across categories
    #[arg(long)]
    slug: String,

    #[arg(long, default_value = "")]
    description: String,

    #[arg(long)]
    image_url: Option<String>,

    /// Create the category hidden from the catalog
    #[arg(long)]
    inactive: bool,
}

pub(crate) async fn run(args: CreateCategoryArgs) -> Result<(), String> {
    let pool = connect(&args.database_url).await?;

    let category = PgCategoriesService::new(Db::new(pool))
        .create_category(NewCategory {
            uuid: CategoryUuid::new(),
            name: args.name,
            description: args.description,
            slug: args.slug,
            image_url: args.image_url,
            is_active: !args.inactive,
        })
        .await
        .map_err(|error| format!("failed to create category: {error}"))?;

    println!("category_uuid: {}", category.uuid);
    println!("name: {}", category.name);
    println!("slug: {}", category.slug);
    println!("is_active: {}", category.is_active);

    Ok(())
}
