use sea_orm::entity::prelude::*;

/// Fixed at creation, never updated afterwards.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Role {
    #[sea_orm(string_value = "learner")]
    Learner,
    #[sea_orm(string_value = "tutor")]
    Tutor,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::learner_profile::Entity")]
    LearnerProfile,
    #[sea_orm(has_one = "super::tutor_profile::Entity")]
    TutorProfile,
}

impl Related<super::learner_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LearnerProfile.def()
    }
}

impl Related<super::tutor_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TutorProfile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
