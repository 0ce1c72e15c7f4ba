use mentora_entity::account::{self, Entity as AccountEntity, Model as Account};
use mentora_entity::learner_course::{self, Entity as LearnerCourseEntity};
use mentora_entity::learner_interest::{self, Entity as LearnerInterestEntity};
use mentora_entity::learner_profile::{Entity as LearnerProfileEntity, Model as LearnerProfile};
use sea_orm::prelude::*;
use sea_orm::{QueryOrder, QuerySelect};
use std::error::Error;

pub struct Query;

impl Query {
    pub async fn find<C: ConnectionTrait>(conn: &C, account_id: Uuid) -> Result<Option<LearnerProfile>, DbErr> {
        LearnerProfileEntity::find_by_id(account_id)
            .one(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %account_id, "failed to load learner profile");
            })
    }

    pub async fn interests<C: ConnectionTrait>(conn: &C, account_id: Uuid) -> Result<Vec<String>, DbErr> {
        LearnerInterestEntity::find()
            .filter(learner_interest::Column::AccountId.eq(account_id))
            .order_by_asc(learner_interest::Column::Interest)
            .all(conn)
            .await
            .map(|rows| rows.into_iter().map(|row| row.interest).collect())
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %account_id, "failed to load learner interests");
            })
    }

    pub async fn enrolled_courses<C: ConnectionTrait>(conn: &C, account_id: Uuid) -> Result<Vec<Uuid>, DbErr> {
        LearnerCourseEntity::find()
            .filter(learner_course::Column::AccountId.eq(account_id))
            .all(conn)
            .await
            .map(|rows| rows.into_iter().map(|row| row.course_id).collect())
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %account_id, "failed to load enrolled courses");
            })
    }

    /// Other learners that share at least one enrolled course with `account_id`.
    pub async fn find_peers<C: ConnectionTrait>(conn: &C, account_id: Uuid) -> Result<Vec<Account>, DbErr> {
        let courses = Self::enrolled_courses(conn, account_id).await?;
        if courses.is_empty() {
            return Ok(vec![]);
        }

        let peer_ids: Vec<Uuid> = LearnerCourseEntity::find()
            .select_only()
            .column(learner_course::Column::AccountId)
            .distinct()
            .filter(learner_course::Column::CourseId.is_in(courses))
            .filter(learner_course::Column::AccountId.ne(account_id))
            .into_tuple()
            .all(conn)
            .await?;
        if peer_ids.is_empty() {
            return Ok(vec![]);
        }

        AccountEntity::find()
            .filter(account::Column::Id.is_in(peer_ids))
            .order_by_asc(account::Column::Name)
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %account_id, "failed to load peers");
            })
    }
}
