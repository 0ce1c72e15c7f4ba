use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "learner_interests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub account_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub interest: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::learner_profile::Entity",
        from = "Column::AccountId",
        to = "super::learner_profile::Column::AccountId"
    )]
    LearnerProfile,
}

impl Related<super::learner_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LearnerProfile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
