use crate::auth::SessionIssuer;
use crate::cookie::session_token;
use crate::routes::error::{ErrorData, ErrorDataProvider, ErrorKind, error_to_axum_response};
use axum::extract::FromRequestParts;
use axum::response::{IntoResponse, Response};
use axum::{Extension, RequestPartsExt};
use axum_extra::extract::{Cached, CookieJar};
use http::request::Parts;
use mentora_db::account;
use mentora_entity::account::Model as Account;
use sea_orm::{DatabaseConnection, DbErr};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub(crate) enum AccessError {
    #[error("authentication required")]
    Unauthorized,

    #[error("this account may not use this endpoint")]
    Forbidden,

    #[error("{0} extension is not registered")]
    MissingExtension(&'static str),

    #[error(transparent)]
    Db(#[from] DbErr),
}

impl ErrorDataProvider<ErrorKind> for AccessError {
    fn error_data(self) -> ErrorData<ErrorKind> {
        match self {
            Self::Unauthorized => ErrorData::new(ErrorKind::Unauthorized, "Authentication required"),
            Self::Forbidden => ErrorData::new(ErrorKind::Forbidden, "Access denied for this role"),
            Self::MissingExtension(_) | Self::Db(_) => ErrorData::internal(&self),
        }
    }
}

impl IntoResponse for AccessError {
    fn into_response(self) -> Response {
        error_to_axum_response(self)
    }
}

/// The account id proven by the session cookie.
#[derive(Clone, Copy)]
struct Session {
    account_id: Uuid,
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AccessError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(token) = session_token(&jar) else {
            tracing::debug!("request without session cookie");
            return Err(AccessError::Unauthorized);
        };

        let Extension(issuer) = parts
            .extract::<Extension<SessionIssuer>>()
            .await
            .map_err(|_| AccessError::MissingExtension("session issuer"))?;

        let account_id = issuer.validate(token).map_err(|_| AccessError::Unauthorized)?;
        Ok(Self { account_id })
    }
}

#[derive(Clone, Copy)]
pub(crate) struct ExtractAccountId(pub Uuid);

impl<S> FromRequestParts<S> for ExtractAccountId
where
    S: Send + Sync,
{
    type Rejection = AccessError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Cached::<Session>::from_request_parts(parts, state).await?.0;
        Ok(Self(session.account_id))
    }
}

/// The account behind the session, freshly loaded for this request.
#[derive(Clone)]
pub(crate) struct ExtractAccount(pub Account);

impl<S> FromRequestParts<S> for ExtractAccount
where
    S: Send + Sync,
{
    type Rejection = AccessError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ExtractAccountId(account_id) = ExtractAccountId::from_request_parts(parts, state).await?;

        let Extension(conn) = parts
            .extract::<Extension<DatabaseConnection>>()
            .await
            .map_err(|_| AccessError::MissingExtension("database connection"))?;

        let Some(account) = account::Query::find_by_id(&conn, account_id).await? else {
            tracing::debug!(%account_id, "session refers to an unknown account");
            return Err(AccessError::Unauthorized);
        };

        sentry::configure_scope(|scope| {
            scope.set_user(Some(sentry::User {
                id: Some(account.id.as_hyphenated().to_string()),
                ..Default::default()
            }));
        });

        Ok(Self(account))
    }
}
