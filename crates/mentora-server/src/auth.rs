use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub(crate) enum AuthError {
    #[error("session token is invalid or expired")]
    InvalidSession,

    #[error("could not sign session token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Startup options for sessions.
#[derive(Clone)]
pub(crate) struct SessionConfig {
    pub(crate) secret: String,
    pub(crate) cookie_secure: bool,
    pub(crate) token_ttl: TimeDelta,
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"<redacted>")
            .field("cookie_secure", &self.cookie_secure)
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    iat: i64,
    exp: i64,
}

struct InnerSessionIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
    cookie_secure: bool,
}

/// Mints and checks session tokens. The token only names the account, the role is always read from the store.
#[derive(Clone)]
pub(crate) struct SessionIssuer(Arc<InnerSessionIssuer>);

impl SessionIssuer {
    pub(crate) fn new(config: &SessionConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self(Arc::new(InnerSessionIssuer {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            ttl: config.token_ttl,
            cookie_secure: config.cookie_secure,
        }))
    }

    pub(crate) fn ttl(&self) -> TimeDelta {
        self.0.ttl
    }

    pub(crate) fn cookie_secure(&self) -> bool {
        self.0.cookie_secure
    }

    pub(crate) fn issue(&self, account_id: Uuid) -> Result<String, AuthError> {
        self.issue_at(account_id, Utc::now())
    }

    fn issue_at(&self, account_id: Uuid, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims {
            sub: account_id,
            iat: now.timestamp(),
            exp: (now + self.0.ttl).timestamp(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.0.encoding).map_err(|error| {
            tracing::error!(error = &error as &dyn std::error::Error, "failed to sign session token");
            AuthError::Signing(error)
        })
    }

    /// Tampered, malformed and expired tokens all fail the same way.
    pub(crate) fn validate(&self, token: &str) -> Result<Uuid, AuthError> {
        jsonwebtoken::decode::<Claims>(token, &self.0.decoding, &self.0.validation)
            .map(|data| data.claims.sub)
            .map_err(|error| {
                tracing::debug!(kind = ?error.kind(), "rejected session token");
                AuthError::InvalidSession
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer(secret: &str, ttl: TimeDelta) -> SessionIssuer {
        SessionIssuer::new(&SessionConfig {
            secret: secret.to_owned(),
            cookie_secure: false,
            token_ttl: ttl,
        })
    }

    #[test]
    fn test_round_trip() {
        let issuer = issuer("secret", TimeDelta::days(30));
        let id = Uuid::new_v4();
        let token = issuer.issue(id).unwrap();
        assert_eq!(issuer.validate(&token).unwrap(), id);
    }

    #[test]
    fn test_expired_token() {
        let issuer = issuer("secret", TimeDelta::days(30));
        let token = issuer
            .issue_at(Uuid::new_v4(), Utc::now() - TimeDelta::days(31))
            .unwrap();
        assert!(matches!(issuer.validate(&token), Err(AuthError::InvalidSession)));
    }

    #[test]
    fn test_foreign_signature() {
        let token = issuer("other", TimeDelta::days(30)).issue(Uuid::new_v4()).unwrap();
        let issuer = issuer("secret", TimeDelta::days(30));
        assert!(matches!(issuer.validate(&token), Err(AuthError::InvalidSession)));
        assert!(matches!(issuer.validate("not.a.token"), Err(AuthError::InvalidSession)));
        assert!(matches!(issuer.validate(""), Err(AuthError::InvalidSession)));
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = SessionConfig {
            secret: "hunter2".to_owned(),
            cookie_secure: true,
            token_ttl: TimeDelta::days(1),
        };
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
