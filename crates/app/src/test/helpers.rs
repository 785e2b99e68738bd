//! Test Helpers

use crate::domain::{
    categories::{CategoryUuid, NewCategory},
    orders::NewOrder,
    products::{NewProduct, ProductUuid},
};

pub(crate) fn new_category(name: &str, slug: &str) -> NewCategory {
    NewCategory {
        uuid: CategoryUuid::new(),
        name: name.to_string(),
        description: String::new(),
        slug: slug.to_string(),
        image_url: None,
        is_active: true,
    }
}

/// An available, non-featured product with a unique slug.
pub(crate) fn new_product(
    category: CategoryUuid,
    name: &str,
    price: u64,
    stock: u32,
) -> NewProduct {
    let uuid = ProductUuid::new();

    NewProduct {
        uuid,
        category_uuid: category,
        name: name.to_string(),
        description: String::new(),
        slug: format!("product-{}", uuid.into_uuid().simple()),
        price,
        stock,
        image_url: None,
        is_available: true,
        is_featured: false,
    }
}

pub(crate) fn new_order(shipping_address: &str, phone: &str) -> NewOrder {
    NewOrder {
        shipping_address: shipping_address.to_string(),
        phone: phone.to_string(),
        notes: None,
    }
}
