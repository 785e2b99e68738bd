//! App Router

use salvo::Router;

use crate::{auth, cart, categories, favorites, orders, products, users};

/// Catalog routes readable without a token.
fn catalog_router() -> Router {
    Router::new()
        .push(
            Router::with_path("categories")
                .get(categories::index::handler)
                .push(
                    Router::with_path("{category}")
                        .get(categories::get::handler)
                        .push(Router::with_path("products").get(categories::products::handler)),
                ),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("featured").get(products::featured::handler))
                .push(Router::with_path("search").get(products::search::handler))
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
}

/// Per-user routes behind bearer authentication.
fn account_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(Router::with_path("users/me").get(users::me::handler))
        .push(
            Router::with_path("cart").get(cart::get::handler).push(
                Router::with_path("items")
                    .post(cart::items::create::handler)
                    .delete(cart::clear::handler)
                    .push(
                        Router::with_path("{item}")
                            .put(cart::items::update::handler)
                            .delete(cart::items::delete::handler),
                    ),
            ),
        )
        .push(
            Router::with_path("favorites")
                .get(favorites::index::handler)
                .push(Router::with_path("count").get(favorites::count::handler))
                .push(Router::with_path("toggle").post(favorites::toggle::handler)),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .push(Router::with_path("status").patch(orders::status::handler)),
                ),
        )
}

pub(crate) fn api_router() -> Router {
    Router::with_path("api")
        .push(catalog_router())
        .push(account_router())
}
