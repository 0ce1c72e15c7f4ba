use crate::convert::{FromDbModel, IntoModel};
use mentora_entity::account::Model as AccountModel;
use mentora_model::learner::{Learner, Peer, Student};
use uuid::Uuid;

/// Account row, interests and the enrolled course ids.
impl FromDbModel<(AccountModel, Vec<String>, Vec<Uuid>)> for Learner {
    fn from_db_model((account, interests, enrolled_courses): (AccountModel, Vec<String>, Vec<Uuid>)) -> Self {
        Self {
            account: account.into_model(),
            interests,
            enrolled_courses,
        }
    }
}

impl FromDbModel<AccountModel> for Peer {
    fn from_db_model(model: AccountModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

impl FromDbModel<(AccountModel, Vec<Uuid>)> for Student {
    fn from_db_model((account, course_ids): (AccountModel, Vec<Uuid>)) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            course_ids,
        }
    }
}
