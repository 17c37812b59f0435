use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use myshop_core::{Product, ProductId};

use crate::app::dto::{DataResponse, MessageResponse, ProductFieldsRequest};
use crate::app::errors::{ApiError, StoreOperation};
use crate::app::SharedStore;

type ApiResult<T> = Result<T, ApiError>;

pub async fn list_products(
    Extension(store): Extension<SharedStore>,
) -> ApiResult<Json<DataResponse<Vec<Product>>>> {
    let products = store
        .list()
        .await
        .map_err(ApiError::store(StoreOperation::List))?;

    Ok(Json(DataResponse {
        message: "all products",
        data: products,
    }))
}

pub async fn get_product(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<Option<Product>>>> {
    let id = parse_id(&id)?;

    let product = store
        .get(id)
        .await
        .map_err(ApiError::store(StoreOperation::Get))?;

    Ok(Json(DataResponse {
        message: "single product found",
        data: product,
    }))
}

pub async fn create_product(
    Extension(store): Extension<SharedStore>,
    body: Result<Json<ProductFieldsRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let new_product = read_body(body)?.into_new_product()?;

    let id = store
        .insert(new_product)
        .await
        .map_err(ApiError::store(StoreOperation::Create))?;
    tracing::info!(%id, "product created");

    Ok((StatusCode::CREATED, Json(MessageResponse::new("created product"))))
}

pub async fn update_product(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
    body: Result<Json<ProductFieldsRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    let patch = read_body(body)?.into_patch()?;

    let outcome = store
        .update(id, patch)
        .await
        .map_err(ApiError::store(StoreOperation::Update))?;
    tracing::info!(%id, matched = outcome.matched, modified = outcome.modified, "product edit");

    Ok(Json(MessageResponse::new("product edit successfully")))
}

pub async fn delete_product(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;

    let outcome = store
        .delete(id)
        .await
        .map_err(ApiError::store(StoreOperation::Delete))?;
    tracing::info!(%id, deleted = outcome.deleted, "product deleted");

    Ok(Json(MessageResponse::new("product deleted successfully")))
}

fn parse_id(raw: &str) -> ApiResult<ProductId> {
    raw.parse::<ProductId>().map_err(|e| {
        tracing::debug!(id = raw, error = %e, "rejected product id");
        ApiError::from(e)
    })
}

/// An unreadable body is a validation failure, same as a missing field.
fn read_body(body: Result<Json<ProductFieldsRequest>, JsonRejection>) -> ApiResult<ProductFieldsRequest> {
    match body {
        Ok(Json(fields)) => Ok(fields),
        Err(rejection) => Err(ApiError::Validation(rejection.body_text())),
    }
}
