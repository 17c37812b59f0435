use std::sync::Arc;

use thiserror::Error;

use myshop_core::{NewProduct, Product, ProductId, ProductPatch};

/// Product store operation error.
///
/// These are **infrastructure errors**. Request-shape problems are
/// `DomainError`s and never reach the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached (server selection, IO, auth).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A stored document could not be mapped to a `Product`.
    #[error("failed to decode stored document: {0}")]
    Decode(String),

    /// Any other failure reported by the store.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Result of a partial update.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// Result of a delete.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct DeleteOutcome {
    pub deleted: u64,
}

/// Single-collection product store.
///
/// Each method maps to exactly one store call. Unknown ids are not errors:
/// `get` yields `None`, `update`/`delete` report zero matches.
#[async_trait::async_trait]
pub trait ProductStore: Send + Sync {
    /// All products, in store-defined order.
    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Insert a product. The store assigns and returns its identifier.
    async fn insert(&self, product: NewProduct) -> Result<ProductId, StoreError>;

    /// Set the fields present in `patch`; other fields stay as stored.
    async fn update(&self, id: ProductId, patch: ProductPatch) -> Result<UpdateOutcome, StoreError>;

    async fn delete(&self, id: ProductId) -> Result<DeleteOutcome, StoreError>;
}

#[async_trait::async_trait]
impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        (**self).list().await
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        (**self).get(id).await
    }

    async fn insert(&self, product: NewProduct) -> Result<ProductId, StoreError> {
        (**self).insert(product).await
    }

    async fn update(&self, id: ProductId, patch: ProductPatch) -> Result<UpdateOutcome, StoreError> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: ProductId) -> Result<DeleteOutcome, StoreError> {
        (**self).delete(id).await
    }
}
