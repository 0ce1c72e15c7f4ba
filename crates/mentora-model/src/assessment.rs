use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Assessment {
    pub id: String,
    #[schema(example = "Sample Assessment")]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    pub assessment_id: String,
    pub learner_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
