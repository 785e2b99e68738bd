//! Favorite Handlers

pub(crate) mod count;
pub(crate) mod index;
pub(crate) mod toggle;
