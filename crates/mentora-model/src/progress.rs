use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub learner_id: Uuid,
    pub course_id: Uuid,
    pub completed_modules: Vec<String>,
    /// Unset until the learner first records progress.
    pub last_accessed: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_last_accessed_is_null() {
        let progress = Progress {
            learner_id: Uuid::nil(),
            course_id: Uuid::nil(),
            completed_modules: vec![],
            last_accessed: None,
        };
        let value = serde_json::to_value(&progress).unwrap();
        assert_eq!(value["lastAccessed"], serde_json::Value::Null);
        assert_eq!(value["completedModules"], serde_json::json!([]));
    }
}
