use crate::routes::error::{ErrorData, ErrorDataProvider, ErrorKind, error_to_axum_response};
use axum::response::{IntoResponse, Response};
use mentora_db::enrollment::EnrollmentError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum LearnerError {
    #[error("missing fields: {0:?}")]
    MissingFields(Vec<&'static str>),

    #[error("already enrolled in this course")]
    AlreadyEnrolled,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Db(#[from] DbErr),
}

impl From<EnrollmentError> for LearnerError {
    fn from(error: EnrollmentError) -> Self {
        match error {
            EnrollmentError::AlreadyEnrolled => Self::AlreadyEnrolled,
            EnrollmentError::CourseNotFound => Self::NotFound("Course"),
            EnrollmentError::Db(error) => Self::Db(error),
        }
    }
}

impl ErrorDataProvider<ErrorKind> for LearnerError {
    fn error_data(self) -> ErrorData<ErrorKind> {
        match self {
            Self::MissingFields(fields) => ErrorData::missing_fields(&fields),
            Self::AlreadyEnrolled => ErrorData::new(ErrorKind::AlreadyEnrolled, "Already enrolled in this course"),
            Self::NotFound(what) => ErrorData::new(ErrorKind::NotFound, format!("{what} not found")),
            Self::Db(_) => ErrorData::internal(&self),
        }
    }
}

impl IntoResponse for LearnerError {
    fn into_response(self) -> Response {
        error_to_axum_response(self)
    }
}
