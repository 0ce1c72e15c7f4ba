use crate::util::FlattenTransactionResultExt;
use chrono::{DateTime, Utc};
use mentora_entity::course::{self, Entity as CourseEntity, Model as Course};
use mentora_entity::course_tag::{self, Entity as CourseTagEntity};
use sea_orm::prelude::*;
use sea_orm::{ActiveValue, NotSet, TransactionTrait};
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub description: Option<String>,
    pub level: Option<String>,
    pub tags: Vec<String>,
    pub published: bool,
}

/// `Some(None)` clears an optional column, `None` leaves it as is.
#[derive(Debug, Clone, Default)]
pub struct CourseChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub level: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub published: Option<bool>,
}

impl CourseChanges {
    fn touches_columns(&self) -> bool {
        self.title.is_some() || self.description.is_some() || self.level.is_some() || self.published.is_some()
    }
}

pub struct Mutation;

impl Mutation {
    async fn replace_tags<C: ConnectionTrait>(conn: &C, course_id: Uuid, tags: Vec<String>) -> Result<(), DbErr> {
        CourseTagEntity::delete_many()
            .filter(course_tag::Column::CourseId.eq(course_id))
            .exec(conn)
            .await?;

        let tags: BTreeSet<String> = tags.into_iter().collect();
        if tags.is_empty() {
            return Ok(());
        }
        CourseTagEntity::insert_many(tags.into_iter().map(|tag| course_tag::ActiveModel {
            course_id: ActiveValue::Set(course_id),
            tag: ActiveValue::Set(tag),
        }))
        .exec_without_returning(conn)
        .await?;
        Ok(())
    }

    pub async fn create<C: ConnectionTrait + TransactionTrait>(
        conn: &C,
        tutor_id: Uuid,
        course: NewCourse,
        now: DateTime<Utc>,
    ) -> Result<Course, DbErr> {
        conn.transaction(|txn| {
            Box::pin(async move {
                let NewCourse {
                    title,
                    description,
                    level,
                    tags,
                    published,
                } = course;

                let model = Course {
                    id: Uuid::new_v4(),
                    tutor_id,
                    title,
                    description,
                    level,
                    published,
                    created_at: now,
                };
                CourseEntity::insert(course::ActiveModel::from(model.clone()))
                    .exec_without_returning(txn)
                    .await?;
                Self::replace_tags(txn, model.id, tags).await?;

                tracing::debug!(course = %model.id, %tutor_id, "created course");
                Ok::<_, DbErr>(model)
            })
        })
        .await
        .flatten_res()
    }

    /// Applies `changes` to a course owned by `tutor_id`.
    ///
    /// Returns `None` when the course does not exist or belongs to someone else.
    pub async fn update<C: ConnectionTrait + TransactionTrait>(
        conn: &C,
        tutor_id: Uuid,
        course_id: Uuid,
        changes: CourseChanges,
    ) -> Result<Option<Course>, DbErr> {
        conn.transaction(|txn| {
            Box::pin(async move {
                let Some(existing) = CourseEntity::find_by_id(course_id)
                    .filter(course::Column::TutorId.eq(tutor_id))
                    .one(txn)
                    .await?
                else {
                    return Ok(None);
                };

                let updated = if changes.touches_columns() {
                    course::ActiveModel {
                        id: ActiveValue::Unchanged(course_id),
                        title: changes.title.map_or(NotSet, ActiveValue::Set),
                        description: changes.description.map_or(NotSet, ActiveValue::Set),
                        level: changes.level.map_or(NotSet, ActiveValue::Set),
                        published: changes.published.map_or(NotSet, ActiveValue::Set),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?
                } else {
                    existing
                };

                if let Some(tags) = changes.tags {
                    Self::replace_tags(txn, course_id, tags).await?;
                }

                Ok::<_, DbErr>(Some(updated))
            })
        })
        .await
        .flatten_res()
    }
}
