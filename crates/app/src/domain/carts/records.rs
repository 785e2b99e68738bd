//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::{products::ProductUuid, users::UserUuid},
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// A user's cart with its line items.
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub user_uuid: UserUuid,
    pub items: Vec<CartItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartRecord {
    /// Sum of line subtotals at current product prices.
    #[must_use]
    pub fn total_price(&self) -> u64 {
        self.items.iter().map(CartItemRecord::subtotal).sum()
    }

    /// Sum of line quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Product details shown on a cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub slug: String,
    pub price: u64,
    pub stock: u32,
    pub image_url: Option<String>,
    pub is_available: bool,
}

/// Cart line item.
#[derive(Debug, Clone)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub product: CartProduct,
    pub quantity: u32,
    pub added_at: Timestamp,
}

impl CartItemRecord {
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.product.price.saturating_mul(u64::from(self.quantity))
    }
}
