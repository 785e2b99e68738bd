//! User Data

use crate::domain::users::records::UserUuid;

/// New User Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub email: String,
    pub full_name: String,
    pub is_staff: bool,
}
