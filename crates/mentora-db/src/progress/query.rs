use super::ProgressRecord;
use mentora_entity::progress::{self, Entity as ProgressEntity, Model as Progress};
use mentora_entity::progress_module::{self, Entity as ProgressModuleEntity};
use sea_orm::prelude::*;
use sea_orm::{Condition, QueryOrder};
use std::collections::HashMap;
use std::error::Error;

pub struct Query;

impl Query {
    pub async fn find<C: ConnectionTrait>(
        conn: &C,
        learner_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<ProgressRecord>, DbErr> {
        let Some(progress) = ProgressEntity::find_by_id((learner_id, course_id)).one(conn).await? else {
            return Ok(None);
        };
        let mut records = Self::attach_modules(conn, vec![progress]).await?;
        Ok(records.pop())
    }

    pub async fn for_learner<C: ConnectionTrait>(conn: &C, learner_id: Uuid) -> Result<Vec<ProgressRecord>, DbErr> {
        let rows = ProgressEntity::find()
            .filter(progress::Column::LearnerId.eq(learner_id))
            .order_by_asc(progress::Column::CreatedAt)
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %learner_id, "error loading progress");
            })?;
        Self::attach_modules(conn, rows).await
    }

    /// Progress of `learner_id`, limited to the given courses.
    pub async fn for_learner_in_courses<C: ConnectionTrait>(
        conn: &C,
        learner_id: Uuid,
        course_ids: Vec<Uuid>,
    ) -> Result<Vec<ProgressRecord>, DbErr> {
        if course_ids.is_empty() {
            return Ok(vec![]);
        }
        let rows = ProgressEntity::find()
            .filter(progress::Column::LearnerId.eq(learner_id))
            .filter(progress::Column::CourseId.is_in(course_ids))
            .order_by_asc(progress::Column::CreatedAt)
            .all(conn)
            .await?;
        Self::attach_modules(conn, rows).await
    }

    async fn attach_modules<C: ConnectionTrait>(conn: &C, rows: Vec<Progress>) -> Result<Vec<ProgressRecord>, DbErr> {
        if rows.is_empty() {
            return Ok(vec![]);
        }

        let condition = rows.iter().fold(Condition::any(), |condition, row| {
            condition.add(
                Condition::all()
                    .add(progress_module::Column::LearnerId.eq(row.learner_id))
                    .add(progress_module::Column::CourseId.eq(row.course_id)),
            )
        });
        let modules = ProgressModuleEntity::find()
            .filter(condition)
            .order_by_asc(progress_module::Column::CompletedAt)
            .order_by_asc(progress_module::Column::ModuleId)
            .all(conn)
            .await?;

        let mut completed: HashMap<(Uuid, Uuid), Vec<String>> = HashMap::new();
        for module in modules {
            completed
                .entry((module.learner_id, module.course_id))
                .or_default()
                .push(module.module_id);
        }

        Ok(rows
            .into_iter()
            .map(|progress| ProgressRecord {
                completed_modules: completed
                    .remove(&(progress.learner_id, progress.course_id))
                    .unwrap_or_default(),
                progress,
            })
            .collect())
    }
}
