//! MongoDB-backed product store.
//!
//! One `Client` is created at startup and shared by every request; the driver
//! pools connections internally and serializes concurrent writes to the same
//! document on the server side.
//!
//! ## Error Mapping
//!
//! | driver error kind | StoreError |
//! |---|---|
//! | `ServerSelection`, `Io`, `Authentication`, `ConnectionPoolCleared` | `Unavailable` |
//! | `BsonDeserialization` | `Decode` |
//! | anything else | `Backend` |

use bson::{doc, oid::ObjectId, Document};
use mongodb::{error::ErrorKind, Client, Collection};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use myshop_core::{NewProduct, Price, Product, ProductId, ProductPatch};

use super::r#trait::{DeleteOutcome, ProductStore, StoreError, UpdateOutcome};
use crate::config::StoreConfig;

/// Stored document shape. `_id` is left out on insert so the server assigns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProductDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl From<NewProduct> for ProductDocument {
    fn from(p: NewProduct) -> Self {
        Self {
            id: None,
            name: Some(p.name),
            price: Some(p.price),
            description: Some(p.description),
        }
    }
}

impl ProductDocument {
    fn into_product(self) -> Result<Product, StoreError> {
        let id = self
            .id
            .ok_or_else(|| StoreError::Decode("document without _id".to_string()))?;
        Ok(Product {
            id: ProductId::from_object_id(id),
            name: self.name,
            price: self.price,
            description: self.description,
        })
    }
}

/// Product store over a single MongoDB collection.
#[derive(Debug, Clone)]
pub struct MongoProductStore {
    collection: Collection<ProductDocument>,
}

impl MongoProductStore {
    /// Connect using `config` and ping the database so bad credentials or an
    /// unreachable cluster fail at startup instead of on the first request.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(config.connection_uri())
            .await
            .map_err(|e| map_mongo_error("connect", e))?;

        let database = client.database(config.database());
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| map_mongo_error("ping", e))?;

        tracing::info!(
            database = config.database(),
            collection = config.collection(),
            "connected to document store"
        );

        Ok(Self {
            collection: database.collection(config.collection()),
        })
    }
}

#[async_trait::async_trait]
impl ProductStore for MongoProductStore {
    #[instrument(skip(self), err)]
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let mut cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| map_mongo_error("find", e))?;

        let mut products = Vec::new();
        while cursor
            .advance()
            .await
            .map_err(|e| map_mongo_error("find", e))?
        {
            let doc = cursor
                .deserialize_current()
                .map_err(|e| map_mongo_error("find", e))?;
            products.push(doc.into_product()?);
        }

        Ok(products)
    }

    #[instrument(skip(self, id), fields(id = %id), err)]
    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let found = self
            .collection
            .find_one(id_filter(id))
            .await
            .map_err(|e| map_mongo_error("find_one", e))?;

        found.map(ProductDocument::into_product).transpose()
    }

    #[instrument(skip(self, product), err)]
    async fn insert(&self, product: NewProduct) -> Result<ProductId, StoreError> {
        let result = self
            .collection
            .insert_one(ProductDocument::from(product))
            .await
            .map_err(|e| map_mongo_error("insert_one", e))?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Decode(format!("unexpected inserted_id {}", result.inserted_id)))?;

        Ok(ProductId::from_object_id(id))
    }

    #[instrument(skip(self, id, patch), fields(id = %id), err)]
    async fn update(&self, id: ProductId, patch: ProductPatch) -> Result<UpdateOutcome, StoreError> {
        let set = set_document(patch)?;
        let result = self
            .collection
            .update_one(id_filter(id), doc! { "$set": set })
            .await
            .map_err(|e| map_mongo_error("update_one", e))?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    #[instrument(skip(self, id), fields(id = %id), err)]
    async fn delete(&self, id: ProductId) -> Result<DeleteOutcome, StoreError> {
        let result = self
            .collection
            .delete_one(id_filter(id))
            .await
            .map_err(|e| map_mongo_error("delete_one", e))?;

        Ok(DeleteOutcome {
            deleted: result.deleted_count,
        })
    }
}

fn id_filter(id: ProductId) -> Document {
    doc! { "_id": ObjectId::from(id) }
}

/// Build the `$set` body from the fields present in `patch`.
fn set_document(patch: ProductPatch) -> Result<Document, StoreError> {
    let mut set = Document::new();
    if let Some(name) = patch.name {
        set.insert("name", name);
    }
    if let Some(price) = patch.price {
        let price = bson::to_bson(&price).map_err(|e| StoreError::Backend(format!("encode price: {e}")))?;
        set.insert("price", price);
    }
    if let Some(description) = patch.description {
        set.insert("description", description);
    }
    Ok(set)
}

fn map_mongo_error(operation: &str, err: mongodb::error::Error) -> StoreError {
    match err.kind.as_ref() {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::Authentication { .. }
        | ErrorKind::ConnectionPoolCleared { .. } => {
            StoreError::Unavailable(format!("{operation}: {err}"))
        }
        ErrorKind::BsonDeserialization(_) => StoreError::Decode(format!("{operation}: {err}")),
        _ => StoreError::Backend(format!("{operation}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_document_contains_only_present_fields() {
        let patch = ProductPatch::from_fields(None, Some(Price::from("$5")), None).unwrap();
        let set = set_document(patch).unwrap();

        assert_eq!(set, doc! { "price": "$5" });
    }

    #[test]
    fn set_document_keeps_numeric_price_numeric() {
        let patch = ProductPatch::from_fields(
            Some("Lamp".to_string()),
            Some(Price::from(9.5)),
            Some("Desk lamp".to_string()),
        )
        .unwrap();
        let set = set_document(patch).unwrap();

        assert_eq!(set.get_str("name").unwrap(), "Lamp");
        assert_eq!(set.get_f64("price").unwrap(), 9.5);
        assert_eq!(set.get_str("description").unwrap(), "Desk lamp");
    }

    #[test]
    fn set_document_encodes_price_beyond_i64_as_double() {
        let huge = Price::Number(serde_json::Number::from(u64::MAX));
        let patch = ProductPatch::from_fields(None, Some(huge), None).unwrap();
        let set = set_document(patch).unwrap();

        assert_eq!(set.get_f64("price").unwrap(), u64::MAX as f64);
    }

    #[test]
    fn insert_document_encodes_price_beyond_i64_as_double() {
        let doc = ProductDocument::from(NewProduct {
            name: "Lamp".to_string(),
            price: Price::Number(serde_json::Number::from(u64::MAX)),
            description: "Desk lamp".to_string(),
        });
        let encoded = bson::to_document(&doc).unwrap();

        assert_eq!(encoded.get_f64("price").unwrap(), 18446744073709551615_u64 as f64);
    }

    #[test]
    fn insert_document_omits_id() {
        let doc = ProductDocument::from(NewProduct {
            name: "Lamp".to_string(),
            price: Price::from("$10"),
            description: "Desk lamp".to_string(),
        });
        let encoded = bson::to_document(&doc).unwrap();

        assert!(!encoded.contains_key("_id"));
        assert_eq!(encoded.get_str("price").unwrap(), "$10");
    }

    #[test]
    fn stored_document_decodes_to_product() {
        let oid = ObjectId::new();
        let raw = doc! { "_id": oid, "name": "Lamp", "price": 12_i32 };
        let decoded: ProductDocument = bson::from_document(raw).unwrap();

        let product = decoded.into_product().unwrap();
        assert_eq!(product.id, ProductId::from_object_id(oid));
        assert_eq!(product.name.as_deref(), Some("Lamp"));
        assert_eq!(product.price, Some(Price::Number(serde_json::Number::from(12_i64))));
        assert!(product.description.is_none());
    }

    #[test]
    fn document_without_id_is_a_decode_error() {
        let doc = ProductDocument {
            id: None,
            name: None,
            price: None,
            description: None,
        };
        assert!(matches!(doc.into_product(), Err(StoreError::Decode(_))));
    }
}
