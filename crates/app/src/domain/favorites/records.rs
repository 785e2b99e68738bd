//! Favorite Records

use jiff::Timestamp;

use crate::{domain::products::ProductRecord, uuids::TypedUuid};

/// Favorite UUID
pub type FavoriteUuid = TypedUuid<FavoriteRecord>;

/// A product the user marked as favorite.
#[derive(Debug, Clone)]
pub struct FavoriteRecord {
    pub uuid: FavoriteUuid,
    pub product: ProductRecord,
    pub created_at: Timestamp,
}
