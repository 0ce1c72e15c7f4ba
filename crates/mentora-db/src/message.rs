use chrono::{DateTime, Utc};
use mentora_entity::message::{ActiveModel, Entity as MessageEntity, Model as Message};
use sea_orm::prelude::*;
use std::error::Error;

pub struct Mutation;

impl Mutation {
    pub async fn create<C: ConnectionTrait>(
        conn: &C,
        sender_id: Uuid,
        receiver_id: Uuid,
        body: String,
        now: DateTime<Utc>,
    ) -> Result<Message, DbErr> {
        let model = Message {
            id: Uuid::new_v4(),
            sender_id,
            receiver_id,
            body,
            created_at: now,
        };
        MessageEntity::insert(ActiveModel::from(model.clone()))
            .exec_without_returning(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %sender_id, %receiver_id, "failed to store message");
            })?;
        Ok(model)
    }
}
