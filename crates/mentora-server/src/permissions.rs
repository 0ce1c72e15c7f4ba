use crate::user::{AccessError, ExtractAccount};
use axum::extract::FromRequestParts;
use axum_extra::extract::Cached;
use http::request::Parts;
use mentora_entity::account::{Model as Account, Role};

/// Loads the session account and rejects it unless it has `role`.
async fn require_role<S>(parts: &mut Parts, state: &S, role: Role) -> Result<Account, AccessError>
where
    S: Send + Sync,
{
    let ExtractAccount(account) = Cached::<ExtractAccount>::from_request_parts(parts, state).await?.0;
    if account.role != role {
        tracing::debug!(account = %account.id, actual = ?account.role, required = ?role, "role check failed");
        return Err(AccessError::Forbidden);
    }
    Ok(account)
}

macro_rules! role_extractor {
    ($(#[$meta:meta])* $name:ident, $role:expr) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub(crate) struct $name(pub Account);

        impl<S> FromRequestParts<S> for $name
        where
            S: Send + Sync,
        {
            type Rejection = AccessError;

            async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
                require_role(parts, state, $role).await.map(Self)
            }
        }
    };
}

role_extractor!(
    /// A session whose account is a learner.
    ExtractLearner,
    Role::Learner
);
role_extractor!(
    /// A session whose account is a tutor.
    ExtractTutor,
    Role::Tutor
);
