use argon2::Argon2;
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use thiserror::Error;
use tokio::sync::OnceCell;
use tokio::task::{self, JoinError};

static PLACEHOLDER_HASH: OnceCell<String> = OnceCell::const_new();

#[derive(Debug, Error)]
pub(crate) enum PasswordError {
    #[error("could not generate salt: {0}")]
    Salt(getrandom::Error),

    #[error("could not hash password: {0}")]
    Hash(password_hash::Error),

    #[error(transparent)]
    Join(#[from] JoinError),
}

fn hash_blocking(password: &str) -> Result<String, PasswordError> {
    let mut salt = [0u8; 16];
    getrandom::getrandom(&mut salt).map_err(PasswordError::Salt)?;
    let salt = SaltString::encode_b64(&salt).map_err(PasswordError::Hash)?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError::Hash)
}

fn verify_blocking(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        tracing::warn!("stored password hash could not be parsed");
        return false;
    };
    Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok()
}

pub(crate) async fn hash_password(password: String) -> Result<String, PasswordError> {
    task::spawn_blocking(move || hash_blocking(&password)).await?
}

/// A malformed stored hash counts as a mismatch.
pub(crate) async fn verify_password(password: String, hash: String) -> Result<bool, PasswordError> {
    Ok(task::spawn_blocking(move || verify_blocking(&password, &hash)).await?)
}

/// Runs a full verification against a throwaway hash so that a login for an
/// unknown email costs as much as one with a wrong password.
pub(crate) async fn verify_placeholder(password: String) -> Result<(), PasswordError> {
    let hash = PLACEHOLDER_HASH
        .get_or_try_init(|| hash_password("placeholder".to_owned()))
        .await?
        .clone();
    verify_password(password, hash).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test(tokio::test)]
    async fn test_hash_and_verify() {
        let hash = hash_password("correct horse".to_owned()).await.unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse".to_owned(), hash.clone()).await.unwrap());
        assert!(!verify_password("battery staple".to_owned(), hash).await.unwrap());
    }

    #[test(tokio::test)]
    async fn test_salted() {
        let first = hash_password("same".to_owned()).await.unwrap();
        let second = hash_password("same".to_owned()).await.unwrap();
        assert_ne!(first, second);
    }

    #[test(tokio::test)]
    async fn test_malformed_hash() {
        assert!(!verify_password("anything".to_owned(), "plain".to_owned()).await.unwrap());
    }

    #[test(tokio::test)]
    async fn test_placeholder_hash_is_reused() {
        verify_placeholder("anything".to_owned()).await.unwrap();
        let hash = PLACEHOLDER_HASH.get().unwrap().clone();
        assert!(hash.starts_with("$argon2"));

        verify_placeholder("something else".to_owned()).await.unwrap();
        assert_eq!(PLACEHOLDER_HASH.get().unwrap(), &hash);
    }
}
