//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::products::{ProductCategory, ProductRecord};

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Category summary embedded in product payloads
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductCategoryResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<ProductCategory> for ProductCategoryResponse {
    fn from(category: ProductCategory) -> Self {
        ProductCategoryResponse {
            uuid: category.uuid.into(),
            name: category.name,
            slug: category.slug,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// The category the product belongs to
    pub category: ProductCategoryResponse,

    pub name: String,

    pub description: String,

    pub slug: String,

    /// The price of the product in minor currency units
    pub price: u64,

    /// Units currently in stock
    pub stock: u32,

    pub image_url: Option<String>,

    pub is_available: bool,

    pub is_featured: bool,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            category: product.category.into(),
            name: product.name,
            description: product.description,
            slug: product.slug,
            price: product.price,
            stock: product.stock,
            image_url: product.image_url,
            is_available: product.is_available,
            is_featured: product.is_featured,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Get Product Handler
///
/// Returns a single available product.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
#[tracing::instrument(
    name = "products.get",
    skip(product, depot),
    fields(product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = product.into_inner();

    tracing::Span::current().record("product_uuid", tracing::field::display(product));

    let product = state
        .app
        .products
        .get_product(product.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
