use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    #[default]
    Success,
    Error,
}

/// Envelope around every successful response body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// Payload of endpoints that only confirm an action.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Notice {
    #[schema(example = "Logged out successfully")]
    pub message: Cow<'static, str>,
}

impl Notice {
    pub fn new<M: Into<Cow<'static, str>>>(message: M) -> Self {
        Self { message: message.into() }
    }
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            data,
            metadata: None,
        }
    }

    #[must_use]
    pub fn with_metadata<M: Serialize>(mut self, metadata: &M) -> Self {
        self.metadata = serde_json::to_value(metadata).ok();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_envelope() {
        assert_eq!(
            json!({"status": "success", "data": [1, 2]}),
            serde_json::to_value(ApiResponse::new(vec![1, 2])).unwrap()
        );
        assert_eq!(
            json!({"status": "success", "data": "x", "metadata": {"count": 1}}),
            serde_json::to_value(ApiResponse::new("x").with_metadata(&json!({"count": 1}))).unwrap()
        );
    }
}
