//! Category Data

use crate::domain::categories::records::CategoryUuid;

/// New category payload.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub uuid: CategoryUuid,
    pub name: String,
    pub description: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub is_active: bool,
}
