use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Learner,
    Tutor,
}

/// Public part of an account. The password hash never leaves the store.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Account {
    pub id: Uuid,
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_names() {
        assert_eq!(r#""learner""#, serde_json::to_string(&Role::Learner).unwrap());
        assert_eq!(r#""tutor""#, serde_json::to_string(&Role::Tutor).unwrap());
        assert_eq!("tutor", Role::Tutor.to_string());
        assert_eq!("learner", Role::Learner.as_ref());
    }
}
