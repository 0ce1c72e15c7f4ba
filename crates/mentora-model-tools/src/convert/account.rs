use crate::convert::{FromDbModel, IntoModel};
use mentora_entity::account::{Model as AccountModel, Role as RoleModel};
use mentora_model::account::{Account, Role};

impl FromDbModel<RoleModel> for Role {
    fn from_db_model(model: RoleModel) -> Self {
        match model {
            RoleModel::Learner => Self::Learner,
            RoleModel::Tutor => Self::Tutor,
        }
    }
}

impl FromDbModel<AccountModel> for Account {
    fn from_db_model(model: AccountModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            role: model.role.into_model(),
        }
    }
}
