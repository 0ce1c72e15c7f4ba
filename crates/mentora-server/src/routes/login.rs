//! Registration, login and logout shared by the learner and tutor routers.

use crate::auth::{AuthError, SessionIssuer};
use crate::cookie::{logout_cookie, session_cookie};
use crate::password::{self, PasswordError};
use crate::routes::error::{ErrorData, ErrorDataProvider, ErrorKind, error_to_axum_response};
use axum::Json;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use mentora_db::account::{self, AccountError, NewAccount};
use mentora_entity::account::Model as Account;
use mentora_model::response::{ApiResponse, Notice};
use sea_orm::{DatabaseConnection, DbErr};
use serde::Deserialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub(crate) enum AuthRouteError {
    #[error("missing fields: {0:?}")]
    MissingFields(Vec<&'static str>),

    #[error("invalid value for {0}")]
    InvalidField(&'static str),

    #[error("email is already registered")]
    AlreadyExists,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("account is not a tutor")]
    WrongRole,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Session(#[from] AuthError),

    #[error(transparent)]
    Db(#[from] DbErr),
}

impl From<AccountError> for AuthRouteError {
    fn from(error: AccountError) -> Self {
        match error {
            AccountError::EmailTaken => Self::AlreadyExists,
            AccountError::Db(error) => Self::Db(error),
        }
    }
}

impl ErrorDataProvider<ErrorKind> for AuthRouteError {
    fn error_data(self) -> ErrorData<ErrorKind> {
        match self {
            Self::MissingFields(fields) => ErrorData::missing_fields(&fields),
            Self::InvalidField(field) => ErrorData::new(ErrorKind::InvalidRequest, format!("Invalid value for {field}")),
            Self::AlreadyExists => ErrorData::new(ErrorKind::AlreadyExists, "User already exists"),
            Self::InvalidCredentials => ErrorData::new(ErrorKind::InvalidCredentials, "Invalid email or password"),
            Self::WrongRole => ErrorData::new(ErrorKind::WrongRole, "Account is not a tutor"),
            Self::Password(_) | Self::Session(_) | Self::Db(_) => ErrorData::internal(&self),
        }
    }
}

impl IntoResponse for AuthRouteError {
    fn into_response(self) -> Response {
        error_to_axum_response(self)
    }
}

/// Names of the fields that are absent, `null` or empty, in the given order.
pub(crate) fn missing_fields(fields: &[(&'static str, Option<&str>)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| value.is_none_or(str::is_empty))
        .map(|(name, _)| *name)
        .collect()
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct LoginRequest {
    #[schema(example = "alice@example.com")]
    pub(crate) email: Option<String>,
    pub(crate) password: Option<String>,
}

/// Checked registration input.
pub(crate) struct Registration {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) password: String,
}

impl Registration {
    /// Reports every missing field at once.
    pub(crate) fn validate(
        name: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<Self, AuthRouteError> {
        let email = email.map(|email| normalize_email(&email));
        let missing = missing_fields(&[
            ("name", name.as_deref()),
            ("email", email.as_deref()),
            ("password", password.as_deref()),
        ]);
        match (name, email, password) {
            (Some(name), Some(email), Some(password)) if missing.is_empty() => Ok(Self { name, email, password }),
            _ => Err(AuthRouteError::MissingFields(missing)),
        }
    }

    pub(crate) async fn into_new_account(self) -> Result<NewAccount, AuthRouteError> {
        let password_hash = password::hash_password(self.password).await?;
        Ok(NewAccount {
            name: self.name,
            email: self.email,
            password_hash,
        })
    }
}

/// Every failed login, including one without credentials, yields the same error.
pub(crate) async fn authenticate(conn: &DatabaseConnection, request: LoginRequest) -> Result<Account, AuthRouteError> {
    let email = request.email.map(|email| normalize_email(&email)).filter(|email| !email.is_empty());
    let password = request.password.filter(|password| !password.is_empty());
    let (Some(email), Some(password)) = (email, password) else {
        tracing::debug!("login without email or password");
        return Err(AuthRouteError::InvalidCredentials);
    };

    let Some(account) = account::Query::find_by_email(conn, &email).await? else {
        tracing::debug!("login for unknown email");
        password::verify_placeholder(password).await?;
        return Err(AuthRouteError::InvalidCredentials);
    };
    if !password::verify_password(password, account.password_hash.clone()).await? {
        tracing::debug!(account = %account.id, "login with wrong password");
        return Err(AuthRouteError::InvalidCredentials);
    }
    Ok(account)
}

pub(crate) fn start_session(
    issuer: &SessionIssuer,
    jar: CookieJar,
    account: &Account,
) -> Result<CookieJar, AuthRouteError> {
    let token = issuer.issue(account.id)?;
    tracing::info!(account = %account.id, role = ?account.role, "session started");
    Ok(jar.add(session_cookie(token, issuer)))
}

/// Tokens are not revoked server side, logout only replaces the cookie.
pub(crate) fn end_session(issuer: &SessionIssuer, jar: CookieJar) -> (CookieJar, Json<ApiResponse<Notice>>) {
    (
        jar.add(logout_cookie(issuer)),
        Json(ApiResponse::new(Notice::new("Logged out successfully"))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_in_order() {
        let missing = missing_fields(&[("name", None), ("email", Some("")), ("password", Some("x"))]);
        assert_eq!(missing, vec!["name", "email"]);
    }

    #[test]
    fn test_registration_reports_all_missing() {
        let Err(AuthRouteError::MissingFields(missing)) = Registration::validate(None, Some("  ".to_owned()), None)
        else {
            panic!("expected missing fields");
        };
        assert_eq!(missing, vec!["name", "email", "password"]);
    }

    #[test]
    fn test_registration_normalizes_email() {
        let registration = Registration::validate(
            Some("Alice".to_owned()),
            Some(" Alice@Example.COM ".to_owned()),
            Some("pw".to_owned()),
        )
        .unwrap();
        assert_eq!(registration.email, "alice@example.com");
    }
}
