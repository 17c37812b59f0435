use serde::{Deserialize, Serialize, Serializer};

use crate::error::{DomainError, DomainResult};
use crate::id::ProductId;

/// Message returned when a create request lacks a required field.
pub const MISSING_CREATE_FIELDS: &str = "required parameter missing. example JSON request body: \
{name: \"abc product\", price: \"$23.12\", description: \"abc product description\"}";

/// Message returned when an update request carries none of the editable fields.
pub const MISSING_UPDATE_FIELDS: &str = "required parameter missing. atleast one parameter is required: \
name, price or description to complete update";

/// Product price, stored exactly as the client sent it.
///
/// No numeric validation: `"$23.12"` and `23.12` are both accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Text(String),
    Number(serde_json::Number),
}

impl Price {
    /// Empty text counts as "not provided". Whitespace is a value.
    fn is_blank(&self) -> bool {
        match self {
            Price::Text(s) => s.is_empty(),
            Price::Number(_) => false,
        }
    }
}

/// Integers outside the `i64` range are written as doubles so every encoder,
/// BSON included, can represent them.
impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Price::Text(s) => serializer.serialize_str(s),
            Price::Number(n) => match n.as_i64() {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(n.as_f64().unwrap_or(f64::NAN)),
            },
        }
    }
}

impl From<&str> for Price {
    fn from(value: &str) -> Self {
        Price::Text(value.to_string())
    }
}

impl From<f64> for Price {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(Price::Number)
            .unwrap_or_else(|| Price::Text(value.to_string()))
    }
}

/// A stored product record.
///
/// Fields are optional because the store is authoritative: documents written
/// by other clients may lack any of them, and they are returned as found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    /// Materialize a record from a validated insert and its store-issued id.
    pub fn from_new(id: ProductId, new: NewProduct) -> Self {
        Self {
            id,
            name: Some(new.name),
            price: Some(new.price),
            description: Some(new.description),
        }
    }
}

/// A validated insert: every field present and non-blank.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
    pub description: String,
}

impl NewProduct {
    /// Validate raw request fields.
    ///
    /// Fails with [`MISSING_CREATE_FIELDS`] if any field is absent or blank.
    pub fn from_fields(
        name: Option<String>,
        price: Option<Price>,
        description: Option<String>,
    ) -> DomainResult<Self> {
        match (non_blank(name), price.filter(|p| !p.is_blank()), non_blank(description)) {
            (Some(name), Some(price), Some(description)) => Ok(Self {
                name,
                price,
                description,
            }),
            _ => Err(DomainError::validation(MISSING_CREATE_FIELDS)),
        }
    }
}

/// A validated partial update. At least one field is set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Price>,
    pub description: Option<String>,
}

impl ProductPatch {
    /// Validate raw request fields. Blank fields are dropped, not applied.
    ///
    /// Fails with [`MISSING_UPDATE_FIELDS`] when nothing is left to apply.
    pub fn from_fields(
        name: Option<String>,
        price: Option<Price>,
        description: Option<String>,
    ) -> DomainResult<Self> {
        let patch = Self {
            name: non_blank(name),
            price: price.filter(|p| !p.is_blank()),
            description: non_blank(description),
        };
        if patch.is_empty() {
            return Err(DomainError::validation(MISSING_UPDATE_FIELDS));
        }
        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.description.is_none()
    }

    /// Apply the provided fields; absent fields are left untouched.
    pub fn apply(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = Some(name.clone());
        }
        if let Some(price) = &self.price {
            product.price = Some(price.clone());
        }
        if let Some(description) = &self.description {
            product.description = Some(description.clone());
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_product() -> Product {
        Product::from_new(
            ProductId::new(),
            NewProduct {
                name: "abc product".to_string(),
                price: Price::from("$23.12"),
                description: "abc product description".to_string(),
            },
        )
    }

    #[test]
    fn new_product_requires_every_field() {
        let ok = NewProduct::from_fields(
            Some("Lamp".to_string()),
            Some(Price::from("$10")),
            Some("Desk lamp".to_string()),
        );
        assert!(ok.is_ok());

        let cases = [
            (None, Some(Price::from("$10")), Some("Desk lamp".to_string())),
            (Some("Lamp".to_string()), None, Some("Desk lamp".to_string())),
            (Some("Lamp".to_string()), Some(Price::from("$10")), None),
        ];
        for (name, price, description) in cases {
            let err = NewProduct::from_fields(name, price, description).unwrap_err();
            assert_eq!(err, DomainError::Validation(MISSING_CREATE_FIELDS.to_string()));
        }
    }

    #[test]
    fn new_product_rejects_empty_but_keeps_whitespace_fields() {
        let err = NewProduct::from_fields(
            Some(String::new()),
            Some(Price::from("$10")),
            Some("Desk lamp".to_string()),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let new = NewProduct::from_fields(
            Some("   ".to_string()),
            Some(Price::from(" ")),
            Some("Desk lamp".to_string()),
        )
        .unwrap();
        assert_eq!(new.name, "   ");
        assert_eq!(new.price, Price::from(" "));

        let err = NewProduct::from_fields(
            Some("Lamp".to_string()),
            Some(Price::from("")),
            Some("Desk lamp".to_string()),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn numeric_price_is_kept_as_number() {
        let new = NewProduct::from_fields(
            Some("Lamp".to_string()),
            Some(Price::from(23.5)),
            Some("Desk lamp".to_string()),
        )
        .unwrap();
        assert_eq!(serde_json::to_value(&new.price).unwrap(), serde_json::json!(23.5));
    }

    #[test]
    fn price_deserializes_text_or_number() {
        let text: Price = serde_json::from_value(serde_json::json!("$1.99")).unwrap();
        assert_eq!(text, Price::Text("$1.99".to_string()));

        let number: Price = serde_json::from_value(serde_json::json!(7)).unwrap();
        assert_eq!(number, Price::Number(serde_json::Number::from(7u64)));
    }

    #[test]
    fn patch_requires_at_least_one_field() {
        let err = ProductPatch::from_fields(None, None, None).unwrap_err();
        assert_eq!(err, DomainError::Validation(MISSING_UPDATE_FIELDS.to_string()));

        let err = ProductPatch::from_fields(Some(String::new()), Some(Price::from("")), Some(String::new()))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let patch = ProductPatch::from_fields(Some(" ".to_string()), None, None).unwrap();
        assert_eq!(patch.name.as_deref(), Some(" "));
    }

    #[test]
    fn integer_price_beyond_i64_serializes_as_double() {
        let price = Price::Number(serde_json::Number::from(u64::MAX));
        assert_eq!(serde_json::to_value(&price).unwrap(), serde_json::json!(u64::MAX as f64));

        let small = Price::Number(serde_json::Number::from(7u64));
        assert_eq!(serde_json::to_value(&small).unwrap(), serde_json::json!(7));
    }

    #[test]
    fn patch_applies_only_provided_fields() {
        let mut product = stored_product();
        let patch = ProductPatch::from_fields(None, Some(Price::from("$99")), None).unwrap();

        patch.apply(&mut product);

        assert_eq!(product.price, Some(Price::from("$99")));
        assert_eq!(product.name.as_deref(), Some("abc product"));
        assert_eq!(product.description.as_deref(), Some("abc product description"));
    }

    #[test]
    fn product_json_uses_underscore_id_and_omits_missing_fields() {
        let id: ProductId = "507f1f77bcf86cd799439011".parse().unwrap();
        let product = Product {
            id,
            name: Some("Lamp".to_string()),
            price: None,
            description: None,
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "_id": "507f1f77bcf86cd799439011", "name": "Lamp" })
        );
    }
}
