use chrono::{DateTime, Utc};
use mentora_entity::learner_course::{self, Entity as LearnerCourseEntity};
use mentora_entity::learner_interest::{self, Entity as LearnerInterestEntity};
use mentora_entity::learner_profile::{self, Entity as LearnerProfileEntity};
use sea_orm::prelude::*;
use sea_orm::{ActiveValue, TryInsertResult, sea_query};
use std::collections::BTreeSet;

pub struct Mutation;

impl Mutation {
    pub async fn create<C: ConnectionTrait>(
        conn: &C,
        account_id: Uuid,
        interests: Vec<String>,
        now: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        LearnerProfileEntity::insert(learner_profile::ActiveModel {
            account_id: ActiveValue::Set(account_id),
            created_at: ActiveValue::Set(now),
        })
        .exec_without_returning(conn)
        .await?;

        let interests: BTreeSet<String> = interests.into_iter().collect();
        if interests.is_empty() {
            return Ok(());
        }
        LearnerInterestEntity::insert_many(interests.into_iter().map(|interest| learner_interest::ActiveModel {
            account_id: ActiveValue::Set(account_id),
            interest: ActiveValue::Set(interest),
        }))
        .exec_without_returning(conn)
        .await?;
        Ok(())
    }

    /// Adds the course to the learner's enrolled set. Adding an id that is already present is a no-op.
    pub async fn add_enrolled_course<C: ConnectionTrait>(
        conn: &C,
        account_id: Uuid,
        course_id: Uuid,
    ) -> Result<(), DbErr> {
        let on_conflict = sea_query::OnConflict::columns([
            learner_course::Column::AccountId,
            learner_course::Column::CourseId,
        ])
        .do_nothing()
        .to_owned();

        let res = LearnerCourseEntity::insert(learner_course::ActiveModel {
            account_id: ActiveValue::Set(account_id),
            course_id: ActiveValue::Set(course_id),
        })
        .on_conflict(on_conflict)
        .do_nothing()
        .exec(conn)
        .await?;

        if matches!(res, TryInsertResult::Conflicted) {
            tracing::debug!(%account_id, %course_id, "course already in enrolled set");
        }
        Ok(())
    }
}
