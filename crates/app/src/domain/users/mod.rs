//! Users

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use data::NewUser;
pub use errors::UsersServiceError;
pub use records::{UserRecord, UserUuid};
pub use service::*;
