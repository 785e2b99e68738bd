//! Domain services, records and persistence.

pub mod carts;
pub mod categories;
pub mod favorites;
pub mod orders;
pub mod pagination;
pub mod products;
pub mod users;
