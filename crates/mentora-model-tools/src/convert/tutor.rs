use crate::convert::{FromDbModel, FromModel, IntoModel, TryFromDbModel};
use crate::error::Error;
use mentora_entity::account::Model as AccountModel;
use mentora_entity::tutor_availability::{Model as AvailabilityModel, Weekday as WeekdayModel};
use mentora_entity::tutor_profile::Model as TutorProfileModel;
use mentora_model::tutor::{AvailabilitySlot, Tutor, Weekday};
use num_traits::ToPrimitive;

impl FromDbModel<WeekdayModel> for Weekday {
    fn from_db_model(model: WeekdayModel) -> Self {
        match model {
            WeekdayModel::Monday => Self::Monday,
            WeekdayModel::Tuesday => Self::Tuesday,
            WeekdayModel::Wednesday => Self::Wednesday,
            WeekdayModel::Thursday => Self::Thursday,
            WeekdayModel::Friday => Self::Friday,
            WeekdayModel::Saturday => Self::Saturday,
            WeekdayModel::Sunday => Self::Sunday,
        }
    }
}

impl FromModel<Weekday> for WeekdayModel {
    fn from_model(model: Weekday) -> Self {
        match model {
            Weekday::Monday => Self::Monday,
            Weekday::Tuesday => Self::Tuesday,
            Weekday::Wednesday => Self::Wednesday,
            Weekday::Thursday => Self::Thursday,
            Weekday::Friday => Self::Friday,
            Weekday::Saturday => Self::Saturday,
            Weekday::Sunday => Self::Sunday,
        }
    }
}

impl FromDbModel<AvailabilityModel> for AvailabilitySlot {
    fn from_db_model(model: AvailabilityModel) -> Self {
        Self {
            day: model.day.into_model(),
            start_time: model.start_time,
            end_time: model.end_time,
        }
    }
}

impl TryFromDbModel<(AccountModel, TutorProfileModel, Vec<String>, Vec<AvailabilityModel>)> for Tutor {
    type Error = Error;

    fn try_from_db_model(
        (account, profile, subjects, availability): (
            AccountModel,
            TutorProfileModel,
            Vec<String>,
            Vec<AvailabilityModel>,
        ),
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            account: account.into_model(),
            bio: profile.bio,
            subjects,
            hourly_rate: profile.hourly_rate,
            rating: profile.rating,
            review_count: profile.review_count.to_u32().ok_or(Error::NumConversion)?,
            verified: profile.verified,
            availability: availability.into_iter().map(IntoModel::into_model).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::TryIntoModel;
    use chrono::Utc;
    use mentora_entity::account::Role;
    use uuid::Uuid;

    fn rows(review_count: i32) -> (AccountModel, TutorProfileModel, Vec<String>, Vec<AvailabilityModel>) {
        let id = Uuid::new_v4();
        (
            AccountModel {
                id,
                name: "Bob".to_owned(),
                email: "bob@example.com".to_owned(),
                password_hash: "secret".to_owned(),
                role: Role::Tutor,
                created_at: Utc::now(),
            },
            TutorProfileModel {
                account_id: id,
                bio: "Hi".to_owned(),
                hourly_rate: 30.0,
                rating: 4.5,
                review_count,
                verified: true,
                created_at: Utc::now(),
            },
            vec!["math".to_owned()],
            vec![AvailabilityModel {
                id: Uuid::new_v4(),
                account_id: id,
                day: WeekdayModel::Sunday,
                start_time: "08:00".to_owned(),
                end_time: "09:00".to_owned(),
            }],
        )
    }

    #[test]
    fn test_convert_tutor() {
        let tutor: Tutor = rows(12).try_into_model().unwrap();
        assert_eq!(tutor.review_count, 12);
        assert_eq!(tutor.account.name, "Bob");
        assert_eq!(tutor.availability[0].day, Weekday::Sunday);
    }

    #[test]
    fn test_negative_review_count() {
        let result: Result<Tutor, _> = rows(-1).try_into_model();
        assert!(matches!(result, Err(Error::NumConversion)));
    }
}
