use axum::{
    routing::{get, post},
    Router,
};

pub mod products;
pub mod system;

/// Router for every endpoint the service exposes.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .route("/products", get(products::list_products))
        .route("/product", post(products::create_product))
        .route(
            "/product/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
}
