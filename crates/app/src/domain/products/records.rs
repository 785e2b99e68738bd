//! Product Records

use jiff::Timestamp;

use crate::{domain::categories::CategoryUuid, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Summary of the category a product belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCategory {
    pub uuid: CategoryUuid,
    pub name: String,
    pub slug: String,
}

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub category: ProductCategory,
    pub name: String,
    pub description: String,
    pub slug: String,

    /// Unit price in minor currency units.
    pub price: u64,

    pub stock: u32,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub is_featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
