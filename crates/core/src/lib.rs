//! `myshop-core` — product domain building blocks.
//!
//! This crate contains **pure domain** types (no HTTP, no storage client).

pub mod error;
pub mod id;
pub mod product;

pub use error::{DomainError, DomainResult};
pub use id::ProductId;
pub use product::{NewProduct, Price, Product, ProductPatch};
