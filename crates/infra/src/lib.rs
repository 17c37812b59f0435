//! Infrastructure layer: document store adapters and configuration.

pub mod config;
pub mod product_store;

pub use config::{ConfigError, StoreConfig};
pub use product_store::{
    DeleteOutcome, InMemoryProductStore, MongoProductStore, ProductStore, StoreError, UpdateOutcome,
};
