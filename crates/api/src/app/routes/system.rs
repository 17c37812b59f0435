use axum::http::StatusCode;

pub async fn root() -> &'static str {
    "My Shop"
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
