use mentora_entity::enrollment::{self, Entity as EnrollmentEntity, Model as Enrollment};
use sea_orm::prelude::*;
use sea_orm::QueryOrder;
use std::error::Error;

pub struct Query;

impl Query {
    pub async fn find<C: ConnectionTrait>(
        conn: &C,
        learner_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<Enrollment>, DbErr> {
        EnrollmentEntity::find_by_id((learner_id, course_id))
            .one(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %learner_id, %course_id, "error loading enrollment");
            })
    }

    /// All enrollments into any of `course_ids`, oldest first.
    pub async fn for_courses<C: ConnectionTrait>(conn: &C, course_ids: Vec<Uuid>) -> Result<Vec<Enrollment>, DbErr> {
        if course_ids.is_empty() {
            return Ok(vec![]);
        }
        EnrollmentEntity::find()
            .filter(enrollment::Column::CourseId.is_in(course_ids))
            .order_by_asc(enrollment::Column::EnrolledAt)
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, "error loading course enrollments");
            })
    }
}
