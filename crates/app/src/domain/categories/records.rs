//! Category Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Category Record
#[derive(Debug, Clone)]
pub struct CategoryRecord {
    pub uuid: CategoryUuid,
    pub name: String,
    pub description: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub is_active: bool,

    /// Number of currently available products in this category.
    pub products_count: u64,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
