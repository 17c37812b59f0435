use std::collections::BTreeMap;
use std::sync::RwLock;

use myshop_core::{NewProduct, Product, ProductId, ProductPatch};

use super::r#trait::{DeleteOutcome, ProductStore, StoreError, UpdateOutcome};

/// In-memory product store.
///
/// Intended for tests/dev. Ids are freshly minted ObjectIds, so listing in key
/// order is also insertion order.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: RwLock<BTreeMap<ProductId, Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> StoreError {
        StoreError::Backend("lock poisoned".to_string())
    }
}

#[async_trait::async_trait]
impl ProductStore for InMemoryProductStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let products = self.products.read().map_err(|_| Self::poisoned())?;
        Ok(products.values().cloned().collect())
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let products = self.products.read().map_err(|_| Self::poisoned())?;
        Ok(products.get(&id).cloned())
    }

    async fn insert(&self, product: NewProduct) -> Result<ProductId, StoreError> {
        let mut products = self.products.write().map_err(|_| Self::poisoned())?;
        let id = ProductId::new();
        products.insert(id, Product::from_new(id, product));
        Ok(id)
    }

    async fn update(&self, id: ProductId, patch: ProductPatch) -> Result<UpdateOutcome, StoreError> {
        let mut products = self.products.write().map_err(|_| Self::poisoned())?;
        let Some(product) = products.get_mut(&id) else {
            return Ok(UpdateOutcome::default());
        };

        let before = product.clone();
        patch.apply(product);
        let modified = u64::from(*product != before);

        Ok(UpdateOutcome { matched: 1, modified })
    }

    async fn delete(&self, id: ProductId) -> Result<DeleteOutcome, StoreError> {
        let mut products = self.products.write().map_err(|_| Self::poisoned())?;
        let deleted = u64::from(products.remove(&id).is_some());
        Ok(DeleteOutcome { deleted })
    }
}
