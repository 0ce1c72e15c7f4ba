//! Denormalized view of the courses a learner is enrolled in.
//!
//! Rows are only ever added by the enrollment workflow, the table is a cache
//! of [`super::enrollment`] and must never hold a course without an enrollment.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "learner_courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub account_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub course_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::learner_profile::Entity",
        from = "Column::AccountId",
        to = "super::learner_profile::Column::AccountId"
    )]
    LearnerProfile,
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
}

impl Related<super::learner_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LearnerProfile.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
