//! User Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// User Record
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Unique user identifier.
    pub uuid: UserUuid,

    /// Login email, unique across users.
    pub email: String,

    /// Display name.
    pub full_name: String,

    /// Whether the user may perform administrative operations.
    pub is_staff: bool,

    /// User creation timestamp.
    pub created_at: Timestamp,

    /// Last update timestamp.
    pub updated_at: Timestamp,
}
