//! Product Data

use crate::domain::{categories::CategoryUuid, products::records::ProductUuid};

/// New product payload.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub description: String,
    pub slug: String,
    pub price: u64,
    pub stock: u32,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub is_featured: bool,
}

/// Product listing filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<CategoryUuid>,
}
