use mentora_entity::course::{self, Entity as CourseEntity, Model as Course};
use mentora_entity::course_tag::{self, Entity as CourseTagEntity};
use sea_orm::prelude::*;
use sea_orm::{QueryOrder, QuerySelect, QueryTrait};
use std::collections::HashMap;
use std::error::Error;

/// Filters for the public catalog. Every set field narrows the result.
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    pub tag: Option<String>,
    pub level: Option<String>,
    pub tutor_id: Option<Uuid>,
}

pub struct Query;

impl Query {
    pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Option<Course>, DbErr> {
        CourseEntity::find_by_id(id).one(conn).await.inspect_err(|error| {
            tracing::error!(error = error as &dyn Error, %id, "error loading course");
        })
    }

    pub async fn list_published<C: ConnectionTrait>(conn: &C, filter: CourseFilter) -> Result<Vec<Course>, DbErr> {
        let mut select = CourseEntity::find().filter(course::Column::Published.eq(true));

        if let Some(level) = filter.level {
            select = select.filter(course::Column::Level.eq(level));
        }
        if let Some(tutor_id) = filter.tutor_id {
            select = select.filter(course::Column::TutorId.eq(tutor_id));
        }
        if let Some(tag) = filter.tag {
            let tagged = CourseTagEntity::find()
                .select_only()
                .column(course_tag::Column::CourseId)
                .filter(course_tag::Column::Tag.eq(tag))
                .into_query();
            select = select.filter(course::Column::Id.in_subquery(tagged));
        }

        select
            .order_by_desc(course::Column::CreatedAt)
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, "error listing published courses");
            })
    }

    pub async fn list_by_tutor<C: ConnectionTrait>(conn: &C, tutor_id: Uuid) -> Result<Vec<Course>, DbErr> {
        CourseEntity::find()
            .filter(course::Column::TutorId.eq(tutor_id))
            .order_by_desc(course::Column::CreatedAt)
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %tutor_id, "error listing tutor courses");
            })
    }

    /// Tags grouped per course. Courses without tags are absent from the map.
    pub async fn tags_for<C: ConnectionTrait>(
        conn: &C,
        course_ids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, Vec<String>>, DbErr> {
        if course_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = CourseTagEntity::find()
            .filter(course_tag::Column::CourseId.is_in(course_ids))
            .order_by_asc(course_tag::Column::Tag)
            .all(conn)
            .await?;

        let mut tags: HashMap<Uuid, Vec<String>> = HashMap::new();
        for row in rows {
            tags.entry(row.course_id).or_default().push(row.tag);
        }
        Ok(tags)
    }
}
