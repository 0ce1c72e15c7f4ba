use chrono::{DateTime, Utc};
use mentora_entity::assessment_submission::{ActiveModel, Entity as SubmissionEntity, Model as Submission};
use sea_orm::prelude::*;
use std::error::Error;

pub struct Mutation;

impl Mutation {
    /// Records a submission. Assessments are not stored, so `assessment_id` is kept as given.
    pub async fn create<C: ConnectionTrait>(
        conn: &C,
        learner_id: Uuid,
        assessment_id: String,
        submission_url: String,
        now: DateTime<Utc>,
    ) -> Result<Submission, DbErr> {
        let model = Submission {
            id: Uuid::new_v4(),
            assessment_id,
            learner_id,
            submission_url: Some(submission_url),
            created_at: now,
        };
        SubmissionEntity::insert(ActiveModel::from(model.clone()))
            .exec_without_returning(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %learner_id, "failed to store submission");
            })?;
        Ok(model)
    }
}
