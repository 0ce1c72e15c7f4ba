use crate::auth::SessionIssuer;
use crate::routes::api::learner::error::LearnerError;
use crate::routes::error::{ErrorData, ErrorKind, RequestError};
use crate::routes::login::{AuthRouteError, LoginRequest, Registration, authenticate, end_session, start_session};
use crate::user::ExtractAccount;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use axum_extra::extract::{CookieJar, WithRejection};
use chrono::Utc;
use http::StatusCode;
use mentora_db::{account, learner_profile};
use mentora_model::account::Account;
use mentora_model::learner::Learner;
use mentora_model::response::{ApiResponse, Notice};
use mentora_model_tools::convert::{FromDbModel, IntoModel};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct RegisterLearnerRequest {
    #[schema(example = "Alice")]
    name: Option<String>,
    #[schema(example = "alice@example.com")]
    email: Option<String>,
    password: Option<String>,
    interests: Option<Vec<String>>,
}

#[utoipa::path(
    post,
    path = "/api/learner/auth/register",
    request_body = RegisterLearnerRequest,
    responses(
        (status = CREATED, description = "Learner registered and logged in", body = ApiResponse<Account>),
        (status = BAD_REQUEST, description = "Missing fields or email already registered", body = ErrorData<ErrorKind>),
    ),
    tag = "learner/auth"
)]
pub(crate) async fn register(
    Extension(conn): Extension<DatabaseConnection>,
    Extension(issuer): Extension<SessionIssuer>,
    jar: CookieJar,
    WithRejection(Json(request), _): WithRejection<Json<RegisterLearnerRequest>, RequestError>,
) -> Result<Response, AuthRouteError> {
    let registration = Registration::validate(request.name, request.email, request.password)?;
    let new_account = registration.into_new_account().await?;
    let account =
        account::Mutation::create_learner(&conn, new_account, request.interests.unwrap_or_default(), Utc::now()).await?;

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
    path = "/api/learner/auth/login",
    request_body = LoginRequest,
    responses(
        (status = OK, description = "Logged in, the session cookie is set", body = ApiResponse<Account>),
        (status = UNAUTHORIZED, description = "Unknown email or wrong password", body = ErrorData<ErrorKind>),
    ),
    tag = "learner/auth"
)]
pub(crate) async fn login(
    Extension(conn): Extension<DatabaseConnection>,
    Extension(issuer): Extension<SessionIssuer>,
    jar: CookieJar,
    WithRejection(Json(request), _): WithRejection<Json<LoginRequest>, RequestError>,
) -> Result<Response, AuthRouteError> {
    let account = authenticate(&conn, request).await?;
    let jar = start_session(&issuer, jar, &account)?;
    Ok((jar, Json(ApiResponse::new(Account::from_db_model(account)))).into_response())
}

#[utoipa::path(
    post,
    path = "/api/learner/auth/logout",
    responses(
        (status = OK, description = "Session cookie cleared", body = ApiResponse<Notice>),
    ),
    tag = "learner/auth"
)]
pub(crate) async fn logout(Extension(issuer): Extension<SessionIssuer>, jar: CookieJar) -> impl IntoResponse {
    end_session(&issuer, jar)
}

#[utoipa::path(
    get,
    path = "/api/learner/auth/me",
    responses(
        (status = OK, description = "The learner profile of the session account", body = ApiResponse<Learner>),
        (status = UNAUTHORIZED, description = "No valid session", body = ErrorData<ErrorKind>),
        (status = NOT_FOUND, description = "The account has no learner profile", body = ErrorData<ErrorKind>),
    ),
    tag = "learner/auth",
    security(
        ("cookie" = [])
    )
)]
pub(crate) async fn me(
    ExtractAccount(account): ExtractAccount,
    Extension(conn): Extension<DatabaseConnection>,
) -> Result<Response, LearnerError> {
    if learner_profile::Query::find(&conn, account.id).await?.is_none() {
        return Err(LearnerError::NotFound("Learner profile"));
    }
    let interests = learner_profile::Query::interests(&conn, account.id).await?;
    let courses = learner_profile::Query::enrolled_courses(&conn, account.id).await?;

    let learner: Learner = (account, interests, courses).into_model();
    Ok(Json(ApiResponse::new(learner)).into_response())
}
