use crate::learner_profile;
use crate::util::FlattenTransactionResultExt;
use chrono::{DateTime, Utc};
use mentora_entity::course::{self, Entity as CourseEntity};
use mentora_entity::enrollment::{self, Entity as EnrollmentEntity, Model as Enrollment};
use mentora_entity::progress::{self, Entity as ProgressEntity};
use sea_orm::prelude::*;
use sea_orm::{ActiveValue, TransactionTrait, TryInsertResult, sea_query};
use std::error::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnrollmentError {
    #[error("learner is already enrolled in this course")]
    AlreadyEnrolled,

    #[error("course does not exist or is not published")]
    CourseNotFound,

    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Inserts the row, mapping a primary key conflict to [`EnrollmentError::AlreadyEnrolled`].
async fn insert_enrollment<C: ConnectionTrait>(conn: &C, model: &Enrollment) -> Result<(), EnrollmentError> {
    let on_conflict = sea_query::OnConflict::columns([enrollment::Column::LearnerId, enrollment::Column::CourseId])
        .do_nothing()
        .to_owned();
    let res = EnrollmentEntity::insert(enrollment::ActiveModel::from(model.clone()))
        .on_conflict(on_conflict)
        .do_nothing()
        .exec(conn)
        .await?;
    if matches!(res, TryInsertResult::Conflicted) {
        tracing::debug!(learner_id = %model.learner_id, course_id = %model.course_id, "lost enrollment race");
        return Err(EnrollmentError::AlreadyEnrolled);
    }
    Ok(())
}

pub struct Mutation;

impl Mutation {
    /// Enrolls `learner_id` into `course_id`.
    ///
    /// The enrollment, an empty progress record and the entry in the learner's
    /// enrolled set are written in one transaction. A second enrollment for the
    /// same pair fails with [`EnrollmentError::AlreadyEnrolled`] and changes nothing.
    pub async fn enroll<C: ConnectionTrait + TransactionTrait>(
        conn: &C,
        learner_id: Uuid,
        course_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Enrollment, EnrollmentError> {
        conn.transaction(|txn| {
            Box::pin(async move {
                let course = CourseEntity::find_by_id(course_id)
                    .filter(course::Column::Published.eq(true))
                    .one(txn)
                    .await?;
                if course.is_none() {
                    return Err(EnrollmentError::CourseNotFound);
                }

                if EnrollmentEntity::find_by_id((learner_id, course_id))
                    .one(txn)
                    .await?
                    .is_some()
                {
                    return Err(EnrollmentError::AlreadyEnrolled);
                }

                let model = Enrollment {
                    learner_id,
                    course_id,
                    id: Uuid::new_v4(),
                    enrolled_at: now,
                };

                insert_enrollment(txn, &model).await?;

                ProgressEntity::insert(progress::ActiveModel {
                    learner_id: ActiveValue::Set(learner_id),
                    course_id: ActiveValue::Set(course_id),
                    last_accessed: ActiveValue::Set(None),
                    created_at: ActiveValue::Set(now),
                })
                .exec_without_returning(txn)
                .await?;

                learner_profile::Mutation::add_enrolled_course(txn, learner_id, course_id).await?;

                tracing::info!(enrollment = %model.id, %learner_id, %course_id, "learner enrolled");
                Ok::<_, EnrollmentError>(model)
            })
        })
        .await
        .flatten_res()
        .inspect_err(|error| {
            if let EnrollmentError::Db(error) = error {
                tracing::error!(error = error as &dyn Error, %learner_id, %course_id, "failed to enroll learner");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{self, NewAccount, TutorDetails};
    use crate::course::{self as course_db, NewCourse};
    use crate::schema::setup_schema;
    use chrono::TimeZone;
    use sea_orm::Database;
    use test_log::test;

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            name: "Someone".to_owned(),
            email: email.to_owned(),
            password_hash: "not-a-real-hash".to_owned(),
        }
    }

    #[test(tokio::test)]
    async fn test_conflicting_insert_reports_already_enrolled() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        setup_schema(&db).await.unwrap();
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let tutor_account = new_account("tutor@example.com");
        let tutor = account::Mutation::create_tutor(&db, tutor_account, TutorDetails::default(), now)
            .await
            .unwrap();
        let learner = account::Mutation::create_learner(&db, new_account("learner@example.com"), vec![], now)
            .await
            .unwrap();
        let course = course_db::Mutation::create(
            &db,
            tutor.id,
            NewCourse {
                title: "Intro to Rust".to_owned(),
                description: None,
                level: None,
                tags: vec![],
                published: true,
            },
            now,
        )
        .await
        .unwrap();
        let first = Mutation::enroll(&db, learner.id, course.id, now).await.unwrap();

        let late = Enrollment {
            id: Uuid::new_v4(),
            enrolled_at: now + chrono::TimeDelta::seconds(5),
            ..first.clone()
        };
        let result = insert_enrollment(&db, &late).await;
        assert!(matches!(result, Err(EnrollmentError::AlreadyEnrolled)));

        let stored = EnrollmentEntity::find().all(&db).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, first.id);
    }
}
