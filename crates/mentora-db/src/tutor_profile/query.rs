use mentora_entity::tutor_availability::{self, Entity as AvailabilityEntity, Model as AvailabilitySlot};
use mentora_entity::tutor_profile::{Entity as TutorProfileEntity, Model as TutorProfile};
use mentora_entity::tutor_subject::{self, Entity as TutorSubjectEntity};
use sea_orm::QueryOrder;
use sea_orm::prelude::*;
use std::error::Error;

pub struct Query;

impl Query {
    pub async fn find<C: ConnectionTrait>(conn: &C, account_id: Uuid) -> Result<Option<TutorProfile>, DbErr> {
        TutorProfileEntity::find_by_id(account_id)
            .one(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %account_id, "failed to load tutor profile");
            })
    }

    pub async fn subjects<C: ConnectionTrait>(conn: &C, account_id: Uuid) -> Result<Vec<String>, DbErr> {
        TutorSubjectEntity::find()
            .filter(tutor_subject::Column::AccountId.eq(account_id))
            .order_by_asc(tutor_subject::Column::Subject)
            .all(conn)
            .await
            .map(|rows| rows.into_iter().map(|row| row.subject).collect())
    }

    pub async fn availability<C: ConnectionTrait>(
        conn: &C,
        account_id: Uuid,
    ) -> Result<Vec<AvailabilitySlot>, DbErr> {
        AvailabilityEntity::find()
            .filter(tutor_availability::Column::AccountId.eq(account_id))
            .order_by_asc(tutor_availability::Column::Day)
            .order_by_asc(tutor_availability::Column::StartTime)
            .all(conn)
            .await
    }
}
