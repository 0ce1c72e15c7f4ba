use crate::routes::error::{ErrorData, ErrorDataProvider, ErrorKind, error_to_axum_response};
use axum::response::{IntoResponse, Response};
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum TutorError {
    #[error("missing fields: {0:?}")]
    MissingFields(Vec<&'static str>),

    #[error("invalid value for {0}")]
    InvalidField(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Conversion(#[from] mentora_model_tools::error::Error),

    #[error(transparent)]
    Db(#[from] DbErr),
}

impl ErrorDataProvider<ErrorKind> for TutorError {
    fn error_data(self) -> ErrorData<ErrorKind> {
        match self {
            Self::MissingFields(fields) => ErrorData::missing_fields(&fields),
            Self::InvalidField(field) => ErrorData::new(ErrorKind::InvalidRequest, format!("Invalid value for {field}")),
            Self::NotFound(what) => ErrorData::new(ErrorKind::NotFound, format!("{what} not found")),
            Self::Conversion(_) | Self::Db(_) => ErrorData::internal(&self),
        }
    }
}

impl IntoResponse for TutorError {
    fn into_response(self) -> Response {
        error_to_axum_response(self)
    }
}
