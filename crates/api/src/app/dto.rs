use serde::{Deserialize, Serialize};

use myshop_core::{DomainResult, NewProduct, Price, ProductPatch};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /product` and `PUT /product/:id`.
///
/// Every field is optional at the JSON level; which ones are required depends
/// on the route.
#[derive(Debug, Default, Deserialize)]
pub struct ProductFieldsRequest {
    pub name: Option<String>,
    pub price: Option<Price>,
    pub description: Option<String>,
}

impl ProductFieldsRequest {
    pub fn into_new_product(self) -> DomainResult<NewProduct> {
        NewProduct::from_fields(self.name, self.price, self.description)
    }

    pub fn into_patch(self) -> DomainResult<ProductPatch> {
        ProductPatch::from_fields(self.name, self.price, self.description)
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub message: &'static str,
    pub data: T,
}
