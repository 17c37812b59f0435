use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use myshop_core::DomainError;
use myshop_infra::StoreError;

use crate::app::dto::MessageResponse;

pub const INVALID_PRODUCT_ID: &str = "incorrect product id";

/// Which store call failed; picks the message shown to the caller.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StoreOperation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl StoreOperation {
    pub fn failure_message(self) -> &'static str {
        match self {
            StoreOperation::List => "Failed to get all products, please try later",
            StoreOperation::Get => "Failed to get a product, please try later",
            StoreOperation::Create => "Failed to add, please try later",
            StoreOperation::Update => "Failed to edit a product, please try later",
            StoreOperation::Delete => "Failed to delete a product, please try later",
        }
    }
}

/// Request failure.
///
/// `Validation` carries a message safe to return verbatim. `Store` keeps the
/// cause for logging only.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("store call failed during {operation:?}: {source}")]
    Store {
        operation: StoreOperation,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub fn store(operation: StoreOperation) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Store { operation, source }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidId(_) => Self::Validation(INVALID_PRODUCT_ID.to_string()),
            DomainError::Validation(msg) => Self::Validation(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(message) => json_message(StatusCode::FORBIDDEN, message),
            ApiError::Store { operation, source } => {
                tracing::error!(?operation, error = %source, "store call failed");
                json_message(StatusCode::INTERNAL_SERVER_ERROR, operation.failure_message())
            }
        }
    }
}

pub fn json_message(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(MessageResponse::new(message))).into_response()
}
