use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use http::StatusCode;
use mentora_model::response::ResponseStatus;
use serde::Serialize;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::error::Error;
use thiserror::Error;
use utoipa::ToSchema;

const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub(crate) enum ErrorKind {
    #[serde(rename = "MISSING_FIELDS")]
    MissingFields,
    #[serde(rename = "USER_EXISTS")]
    AlreadyExists,
    #[serde(rename = "INVALID_CREDENTIALS")]
    InvalidCredentials,
    #[serde(rename = "NOT_A_TUTOR")]
    WrongRole,
    #[serde(rename = "UNAUTHORIZED")]
    Unauthorized,
    #[serde(rename = "FORBIDDEN")]
    Forbidden,
    #[serde(rename = "ALREADY_ENROLLED")]
    AlreadyEnrolled,
    #[serde(rename = "NOT_FOUND")]
    NotFound,
    #[serde(rename = "INTERNAL_ERROR")]
    Internal,
    #[serde(rename = "INVALID_REQUEST")]
    InvalidRequest,
}

pub(crate) trait GetStatusCode {
    fn status_code(&self) -> StatusCode;
}

impl GetStatusCode for ErrorKind {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingFields | Self::AlreadyExists | Self::AlreadyEnrolled | Self::InvalidRequest => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::WrongRole | Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ErrorData<T> {
    pub(crate) status: ResponseStatus,
    pub(crate) code: T,
    pub(crate) message: Cow<'static, str>,
    pub(crate) timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) data: Option<Map<String, Value>>,
}

impl<T> ErrorData<T> {
    pub fn new<A: Into<Cow<'static, str>>>(code: T, message: A) -> Self {
        Self {
            status: ResponseStatus::Error,
            code,
            message: message.into(),
            timestamp: Utc::now(),
            data: None,
        }
    }

    #[must_use]
    pub fn with_data(mut self, key: &str, value: Value) -> Self {
        self.data.get_or_insert_with(Map::new).insert(key.to_owned(), value);
        self
    }
}

impl ErrorData<ErrorKind> {
    /// Logs `error` and hides its text outside of debug builds.
    pub fn internal(error: &(dyn Error + 'static)) -> Self {
        tracing::error!(error, "request failed");
        if cfg!(debug_assertions) {
            Self::new(ErrorKind::Internal, error.to_string())
        } else {
            Self::new(ErrorKind::Internal, INTERNAL_MESSAGE)
        }
    }

    pub fn missing_fields(fields: &[&'static str]) -> Self {
        Self::new(
            ErrorKind::MissingFields,
            format!("Missing required fields: {}", fields.join(", ")),
        )
        .with_data("fields", Value::from(fields.to_vec()))
    }
}

pub(crate) trait ErrorDataProvider<T: GetStatusCode> {
    fn error_data(self) -> ErrorData<T>;
}

pub(crate) fn error_to_axum_response<E, T>(error: T) -> Response
where
    E: GetStatusCode + Serialize,
    T: ErrorDataProvider<E>,
{
    let data = error.error_data();
    (data.code.status_code(), Json(data)).into_response()
}

/// Body, path or query that could not be decoded.
#[derive(Error, Debug)]
pub(crate) enum RequestError {
    #[error(transparent)]
    Json(#[from] JsonRejection),

    #[error(transparent)]
    Path(#[from] PathRejection),

    #[error(transparent)]
    Query(#[from] QueryRejection),
}

impl ErrorDataProvider<ErrorKind> for RequestError {
    fn error_data(self) -> ErrorData<ErrorKind> {
        let message = match &self {
            Self::Json(rejection) => rejection.body_text(),
            Self::Path(rejection) => rejection.body_text(),
            Self::Query(rejection) => rejection.body_text(),
        };
        tracing::debug!(%message, "rejected request");
        ErrorData::new(ErrorKind::InvalidRequest, message)
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        error_to_axum_response(self)
    }
}
