use crate::util::{FlattenTransactionResultExt, is_unique_violation};
use crate::{learner_profile, tutor_profile};
use chrono::{DateTime, Utc};
use mentora_entity::account::{ActiveModel, Entity as AccountEntity, Model as Account, Role};
use sea_orm::ActiveValue::Set;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, TransactionTrait};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("an account with this email already exists")]
    EmailTaken,

    #[error(transparent)]
    Db(#[from] DbErr),
}

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Default)]
pub struct TutorDetails {
    pub bio: String,
    pub subjects: Vec<String>,
    pub hourly_rate: f64,
}

pub struct Mutation;

impl Mutation {
    async fn insert_account<C: ConnectionTrait>(
        conn: &C,
        account: NewAccount,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<Account, AccountError> {
        let model = Account {
            id: Uuid::new_v4(),
            name: account.name,
            email: account.email,
            password_hash: account.password_hash,
            role,
            created_at: now,
        };
        let active = ActiveModel {
            id: Set(model.id),
            name: Set(model.name.clone()),
            email: Set(model.email.clone()),
            password_hash: Set(model.password_hash.clone()),
            role: Set(role),
            created_at: Set(now),
        };

        match AccountEntity::insert(active).exec_without_returning(conn).await {
            Ok(_) => Ok(model),
            Err(error) if is_unique_violation(&error) => {
                tracing::debug!("email is already registered");
                Err(AccountError::EmailTaken)
            }
            Err(error) => {
                tracing::error!(error = &error as &dyn std::error::Error, "failed to insert account");
                Err(error.into())
            }
        }
    }

    /// Creates the account together with its learner profile.
    pub async fn create_learner<C: ConnectionTrait + TransactionTrait>(
        conn: &C,
        account: NewAccount,
        interests: Vec<String>,
        now: DateTime<Utc>,
    ) -> Result<Account, AccountError> {
        conn.transaction(|txn| {
            Box::pin(async move {
                let account = Self::insert_account(txn, account, Role::Learner, now).await?;
                learner_profile::Mutation::create(txn, account.id, interests, now).await?;
                tracing::debug!(account = %account.id, "created learner");
                Ok::<_, AccountError>(account)
            })
        })
        .await
        .flatten_res()
    }

    /// Creates the account together with its tutor profile.
    pub async fn create_tutor<C: ConnectionTrait + TransactionTrait>(
        conn: &C,
        account: NewAccount,
        details: TutorDetails,
        now: DateTime<Utc>,
    ) -> Result<Account, AccountError> {
        conn.transaction(|txn| {
            Box::pin(async move {
                let account = Self::insert_account(txn, account, Role::Tutor, now).await?;
                tutor_profile::Mutation::create(txn, account.id, details, now).await?;
                tracing::debug!(account = %account.id, "created tutor");
                Ok::<_, AccountError>(account)
            })
        })
        .await
        .flatten_res()
    }
}
