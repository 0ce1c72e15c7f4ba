use crate::auth::SessionIssuer;
use crate::routes::error::{ErrorData, ErrorKind, RequestError};
use crate::routes::login::{AuthRouteError, LoginRequest, Registration, authenticate, end_session, start_session};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use axum_extra::extract::{CookieJar, WithRejection};
use chrono::Utc;
use http::StatusCode;
use mentora_db::account::{self, TutorDetails};
use mentora_entity::account::Role;
use mentora_model::account::Account;
use mentora_model::response::{ApiResponse, Notice};
use mentora_model_tools::convert::FromDbModel;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct RegisterTutorRequest {
    #[schema(example = "Bob")]
    name: Option<String>,
    #[schema(example = "bob@example.com")]
    email: Option<String>,
    password: Option<String>,
    bio: Option<String>,
    subjects: Option<Vec<String>>,
    #[schema(example = 35.0)]
    hourly_rate: Option<f64>,
}

#[utoipa::path(
    post,
    path = "/api/tutor/auth/register",
    request_body = RegisterTutorRequest,
    responses(
        (status = CREATED, description = "Tutor registered and logged in", body = ApiResponse<Account>),
        (status = BAD_REQUEST, description = "Invalid input or email already registered", body = ErrorData<ErrorKind>),
    ),
    tag = "tutor/auth"
)]
pub(crate) async fn register(
    Extension(conn): Extension<DatabaseConnection>,
    Extension(issuer): Extension<SessionIssuer>,
    jar: CookieJar,
    WithRejection(Json(request), _): WithRejection<Json<RegisterTutorRequest>, RequestError>,
) -> Result<Response, AuthRouteError> {
    let registration = Registration::validate(request.name, request.email, request.password)?;
    if request.hourly_rate.is_some_and(|rate| !rate.is_finite() || rate < 0.0) {
        return Err(AuthRouteError::InvalidField("hourlyRate"));
    }
    let details = TutorDetails {
        bio: request.bio.unwrap_or_default(),
        subjects: request.subjects.unwrap_or_default(),
        hourly_rate: request.hourly_rate.unwrap_or_default(),
    };
    let new_account = registration.into_new_account().await?;
    let account = account::Mutation::create_tutor(&conn, new_account, details, Utc::now()).await?;

    let jar = start_session(&issuer, jar, &account)?;
    Ok((
        StatusCode::CREATED,
        jar,
        Json(ApiResponse::new(Account::from_db_model(account))),
    )
        .into_response())
}

#[utoipa::path(
    post,
    path = "/api/tutor/auth/login",
    request_body = LoginRequest,
    responses(
        (status = OK, description = "Logged in, the session cookie is set", body = ApiResponse<Account>),
        (status = UNAUTHORIZED, description = "Unknown email or wrong password", body = ErrorData<ErrorKind>),
        (status = FORBIDDEN, description = "Valid credentials of an account that is not a tutor", body = ErrorData<ErrorKind>),
    ),
    tag = "tutor/auth"
)]
pub(crate) async fn login(
    Extension(conn): Extension<DatabaseConnection>,
    Extension(issuer): Extension<SessionIssuer>,
    jar: CookieJar,
    WithRejection(Json(request), _): WithRejection<Json<LoginRequest>, RequestError>,
) -> Result<Response, AuthRouteError> {
    let account = authenticate(&conn, request).await?;
    if account.role != Role::Tutor {
        tracing::debug!(account = %account.id, "tutor login with a learner account");
        return Err(AuthRouteError::WrongRole);
    }
    let jar = start_session(&issuer, jar, &account)?;
    Ok((jar, Json(ApiResponse::new(Account::from_db_model(account)))).into_response())
}

#[utoipa::path(
    post,
    path = "/api/tutor/auth/logout",
    responses(
        (status = OK, description = "Session cookie cleared", body = ApiResponse<Notice>),
    ),
    tag = "tutor/auth"
)]
pub(crate) async fn logout(Extension(issuer): Extension<SessionIssuer>, jar: CookieJar) -> impl IntoResponse {
    end_session(&issuer, jar)
}
