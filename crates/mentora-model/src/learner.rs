use crate::account::Account;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Learner {
    #[serde(flatten)]
    pub account: Account,
    pub interests: Vec<String>,
    pub enrolled_courses: Vec<Uuid>,
}

/// Another learner sharing at least one course.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Peer {
    pub id: Uuid,
    pub name: String,
}

/// A learner as seen by a tutor, with the tutor's courses they are enrolled in.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub course_ids: Vec<Uuid>,
}
