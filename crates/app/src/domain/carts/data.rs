//! Cart Data

use crate::domain::products::ProductUuid;

/// Request to add a product to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCartItem {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}
