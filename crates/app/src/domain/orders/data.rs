//! Order Data

/// Checkout details supplied by the customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub shipping_address: String,
    pub phone: String,
    pub notes: Option<String>,
}
