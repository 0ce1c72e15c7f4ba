use super::ProgressRecord;
use crate::util::{FlattenTransactionResultExt, RequireRecord};
use chrono::{DateTime, Utc};
use mentora_entity::progress::{self, Entity as ProgressEntity};
use mentora_entity::progress_module::{self, Entity as ProgressModuleEntity};
use sea_orm::prelude::*;
use sea_orm::{ActiveValue, TransactionTrait, TryInsertResult, sea_query};
use std::error::Error;

pub struct Mutation;

impl Mutation {
    /// Adds `module_id` to the completed set and stamps `last_accessed` with `now`.
    ///
    /// Completing a module twice leaves the set unchanged but still refreshes the
    /// access time. Returns `None` when the learner has no progress for the course.
    pub async fn mark_module_complete<C: ConnectionTrait + TransactionTrait>(
        conn: &C,
        learner_id: Uuid,
        course_id: Uuid,
        module_id: String,
        now: DateTime<Utc>,
    ) -> Result<Option<ProgressRecord>, DbErr> {
        conn.transaction(|txn| {
            Box::pin(async move {
                if ProgressEntity::find_by_id((learner_id, course_id))
                    .one(txn)
                    .await?
                    .is_none()
                {
                    return Ok(None);
                }

                let on_conflict = sea_query::OnConflict::columns([
                    progress_module::Column::LearnerId,
                    progress_module::Column::CourseId,
                    progress_module::Column::ModuleId,
                ])
                .do_nothing()
                .to_owned();
                let res = ProgressModuleEntity::insert(progress_module::ActiveModel {
                    learner_id: ActiveValue::Set(learner_id),
                    course_id: ActiveValue::Set(course_id),
                    module_id: ActiveValue::Set(module_id.clone()),
                    completed_at: ActiveValue::Set(now),
                })
                .on_conflict(on_conflict)
                .do_nothing()
                .exec(txn)
                .await?;
                if matches!(res, TryInsertResult::Conflicted) {
                    tracing::debug!(%learner_id, %course_id, %module_id, "module was already completed");
                }

                progress::ActiveModel {
                    learner_id: ActiveValue::Unchanged(learner_id),
                    course_id: ActiveValue::Unchanged(course_id),
                    last_accessed: ActiveValue::Set(Some(now)),
                    ..Default::default()
                }
                .update(txn)
                .await?;

                let record = super::Query::find(txn, learner_id, course_id).await.require()?;
                Ok::<_, DbErr>(Some(record))
            })
        })
        .await
        .flatten_res()
        .inspect_err(|error| {
            tracing::error!(error = error as &dyn Error, %learner_id, %course_id, "failed to record module completion");
        })
    }
}
