//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    auth::{MockAuthService, Principal},
    context::AppContext,
    domain::{
        carts::{CartItemRecord, CartItemUuid, CartProduct, CartRecord, CartUuid, MockCartsService},
        categories::{CategoryRecord, CategoryUuid, MockCategoriesService},
        favorites::MockFavoritesService,
        orders::{
            MockOrdersService, OrderItemRecord, OrderItemUuid, OrderRecord, OrderStatus, OrderUuid,
        },
        products::{MockProductsService, ProductCategory, ProductRecord, ProductUuid},
        users::{MockUsersService, UserUuid},
    },
};

use crate::{config::pagination::PaginationConfig, extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());
pub(crate) const TEST_STAFF_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(7));

pub(crate) const TEST_PAGINATION: PaginationConfig = PaginationConfig {
    page_size: 10,
    max_page_size: 100,
};

pub(crate) const fn customer() -> Principal {
    Principal {
        user: TEST_USER_UUID,
        is_staff: false,
    }
}

pub(crate) const fn staff() -> Principal {
    Principal {
        user: TEST_STAFF_UUID,
        is_staff: true,
    }
}

#[salvo::handler]
async fn inject_customer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_principal(customer());
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
async fn inject_staff(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_principal(staff());
    ctrl.call_next(req, depot, res).await;
}

/// Service mocks. Any call without a matching expectation fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) auth: MockAuthService,
    pub(crate) users: MockUsersService,
    pub(crate) categories: MockCategoriesService,
    pub(crate) products: MockProductsService,
    pub(crate) carts: MockCartsService,
    pub(crate) favorites: MockFavoritesService,
    pub(crate) orders: MockOrdersService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        let app = AppContext {
            auth: Arc::new(self.auth),
            users: Arc::new(self.users),
            categories: Arc::new(self.categories),
            products: Arc::new(self.products),
            carts: Arc::new(self.carts),
            favorites: Arc::new(self.favorites),
            orders: Arc::new(self.orders),
        };

        State::shared(app, TEST_PAGINATION)
    }

    /// Serve `route` without an authenticated caller.
    pub(crate) fn public_service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }

    /// Serve `route` as a regular customer.
    pub(crate) fn customer_service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_customer)
                .push(route),
        )
    }

    /// Serve `route` as a staff member.
    pub(crate) fn staff_service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_staff)
                .push(route),
        )
    }
}

pub(crate) fn make_category(uuid: CategoryUuid) -> CategoryRecord {
    CategoryRecord {
        uuid,
        name: "Puzzles".to_owned(),
        description: "Brain teasers".to_owned(),
        slug: "puzzles".to_owned(),
        image_url: None,
        is_active: true,
        products_count: 3,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        category: ProductCategory {
            uuid: CategoryUuid::from_uuid(Uuid::from_u128(1)),
            name: "Puzzles".to_owned(),
            slug: "puzzles".to_owned(),
        },
        name: "Speed Cube".to_owned(),
        description: "A 3x3 cube".to_owned(),
        slug: format!("speed-cube-{uuid}"),
        price: 1_500,
        stock: 100,
        image_url: None,
        is_available: true,
        is_featured: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart_item(product: ProductUuid, price: u64, quantity: u32) -> CartItemRecord {
    CartItemRecord {
        uuid: CartItemUuid::new(),
        product: CartProduct {
            uuid: product,
            name: "Speed Cube".to_owned(),
            slug: format!("speed-cube-{product}"),
            price,
            stock: 100,
            image_url: None,
            is_available: true,
        },
        quantity,
        added_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart(items: Vec<CartItemRecord>) -> CartRecord {
    CartRecord {
        uuid: CartUuid::new(),
        user_uuid: TEST_USER_UUID,
        items,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(uuid: OrderUuid, status: OrderStatus) -> OrderRecord {
    let product = ProductUuid::new();

    OrderRecord {
        uuid,
        user_uuid: TEST_USER_UUID,
        shipping_address: "Main St 1".to_owned(),
        phone: "123".to_owned(),
        notes: None,
        status,
        total_price: 4_000,
        items: vec![
            OrderItemRecord {
                uuid: OrderItemUuid::new(),
                product_uuid: Some(product),
                product_name: "Speed Cube".to_owned(),
                quantity: 2,
                unit_price: 1_500,
            },
            OrderItemRecord {
                uuid: OrderItemUuid::new(),
                product_uuid: None,
                product_name: "Retired Puzzle".to_owned(),
                quantity: 1,
                unit_price: 1_000,
            },
        ],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
