use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use mentora_model::response::ApiResponse;
use serde::Serialize;

pub(crate) fn ok<T: Serialize>(data: T) -> Response {
    Json(ApiResponse::new(data)).into_response()
}

pub(crate) fn created<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(ApiResponse::new(data))).into_response()
}

pub(crate) fn ok_with_metadata<T: Serialize, M: Serialize>(data: T, metadata: &M) -> Response {
    Json(ApiResponse::new(data).with_metadata(metadata)).into_response()
}
