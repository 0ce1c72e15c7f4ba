use mentora_entity::account::{self, Entity as AccountEntity, Model as Account};
use sea_orm::prelude::*;
use std::error::Error;

pub struct Query;

impl Query {
    pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Option<Account>, DbErr> {
        AccountEntity::find_by_id(id).one(conn).await.inspect_err(|error| {
            tracing::error!(error = error as &dyn Error, %id, "error loading account");
        })
    }

    /// `email` has to be normalized by the caller, the lookup is an exact match.
    pub async fn find_by_email<C: ConnectionTrait>(conn: &C, email: &str) -> Result<Option<Account>, DbErr> {
        AccountEntity::find()
            .filter(account::Column::Email.eq(email))
            .one(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, "error loading account by email");
            })
    }

    pub async fn find_many<C: ConnectionTrait>(conn: &C, ids: Vec<Uuid>) -> Result<Vec<Account>, DbErr> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        AccountEntity::find()
            .filter(account::Column::Id.is_in(ids))
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, "error loading accounts");
            })
    }
}
