//! Order Repositories

mod items;
mod orders;

pub(crate) use items::{CheckoutLine, PgOrderItemsRepository};
pub(crate) use orders::PgOrdersRepository;
