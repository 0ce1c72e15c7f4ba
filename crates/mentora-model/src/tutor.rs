use crate::account::Account;
use serde::{Deserialize, Serialize};
use strum::Display;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    pub day: Weekday,
    #[schema(example = "09:00")]
    pub start_time: String,
    #[schema(example = "12:00")]
    pub end_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tutor {
    #[serde(flatten)]
    pub account: Account,
    pub bio: String,
    pub subjects: Vec<String>,
    pub hourly_rate: f64,
    pub rating: f64,
    pub review_count: u32,
    pub verified: bool,
    pub availability: Vec<AvailabilitySlot>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::Role;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn test_serialize_flattened_account() {
        let id = Uuid::new_v4();
        let tutor = Tutor {
            account: Account {
                id,
                name: "Bob".to_owned(),
                email: "bob@example.com".to_owned(),
                role: Role::Tutor,
            },
            bio: String::new(),
            subjects: vec!["math".to_owned()],
            hourly_rate: 25.0,
            rating: 0.0,
            review_count: 0,
            verified: false,
            availability: vec![AvailabilitySlot {
                day: Weekday::Friday,
                start_time: "10:00".to_owned(),
                end_time: "11:00".to_owned(),
            }],
        };

        assert_eq!(
            json!({
                "id": id,
                "name": "Bob",
                "email": "bob@example.com",
                "role": "tutor",
                "bio": "",
                "subjects": ["math"],
                "hourlyRate": 25.0,
                "rating": 0.0,
                "reviewCount": 0,
                "verified": false,
                "availability": [{"day": "Friday", "startTime": "10:00", "endTime": "11:00"}],
            }),
            serde_json::to_value(&tutor).unwrap()
        );
    }
}
