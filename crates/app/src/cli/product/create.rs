use clap::Args;
use storefront_app::{
    database::Db,
    domain::{
        categories::CategoryUuid,
        products::{NewProduct, PgProductsService, ProductUuid, ProductsService},
    },
};
use uuid::Uuid;

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Category the product belongs to
    #[arg(long)]
    category_uuid: Uuid,

    #[arg(long)]
    name: String,

    /// URL slug, unique across products
    #[arg(long)]
    slug: String,

    /// Unit price in minor currency units (1500 = 15.00)
    #[arg(long)]
    price: u64,

    #[arg(long, default_value_t = 0)]
    stock: u32,

    #[arg(long, default_value = "")]
    description: String,

    #[arg(long)]
    image_url: Option<String>,

    /// Create the product hidden from the catalog
    #[arg(long)]
    unavailable: bool,

    /// Include the product in the featured listing
    #[arg(long)]
    featured: bool,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let pool = connect(&args.database_url).await?;

    let product = PgProductsService::new(Db::new(pool))
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            category_uuid: CategoryUuid::from_uuid(args.category_uuid),
            name: args.name,
            description: args.description,
            slug: args.slug,
            price: args.price,
            stock: args.stock,
            image_url: args.image_url,
            is_available: !args.unavailable,
            is_featured: args.featured,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("name: {}", product.name);
    println!("slug: {}", product.slug);
    println!("category: {}", product.category.slug);
    println!("price: {}", product.price);
    println!("stock: {}", product.stock);

    Ok(())
}
