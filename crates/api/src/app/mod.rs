//! HTTP API application wiring (Axum router + store injection).
//!
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response bodies
//! - `errors.rs`: error kinds and their HTTP mapping

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use myshop_infra::ProductStore;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;

/// Store handle shared by every request.
pub type SharedStore = Arc<dyn ProductStore>;

/// Build the full HTTP router around an injected store (public entrypoint used by `main.rs`).
pub fn build_app(store: SharedStore) -> Router {
    routes::router().layer(Extension(store)).layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn(middleware::log_requests))
            .layer(axum::middleware::from_fn(middleware::cors)),
    )
}
