use crate::account::TutorDetails;
use crate::util::FlattenTransactionResultExt;
use chrono::{DateTime, Utc};
use mentora_entity::tutor_availability::{self, Entity as AvailabilityEntity, Weekday};
use mentora_entity::tutor_profile::{self, Entity as TutorProfileEntity, Model as TutorProfile};
use mentora_entity::tutor_subject::{self, Entity as TutorSubjectEntity};
use sea_orm::prelude::*;
use sea_orm::{ActiveValue, NotSet, TransactionTrait};
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct NewSlot {
    pub day: Weekday,
    pub start_time: String,
    pub end_time: String,
}

/// Unset fields are left untouched. Collections replace the stored set as a whole.
#[derive(Debug, Clone, Default)]
pub struct TutorProfileChanges {
    pub bio: Option<String>,
    pub hourly_rate: Option<f64>,
    pub subjects: Option<Vec<String>>,
    pub availability: Option<Vec<NewSlot>>,
}

pub struct Mutation;

impl Mutation {
    pub async fn create<C: ConnectionTrait>(
        conn: &C,
        account_id: Uuid,
        details: TutorDetails,
        now: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        TutorProfileEntity::insert(tutor_profile::ActiveModel {
            account_id: ActiveValue::Set(account_id),
            bio: ActiveValue::Set(details.bio),
            hourly_rate: ActiveValue::Set(details.hourly_rate),
            rating: ActiveValue::Set(0.0),
            review_count: ActiveValue::Set(0),
            verified: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
        })
        .exec_without_returning(conn)
        .await?;

        Self::insert_subjects(conn, account_id, details.subjects).await
    }

    async fn insert_subjects<C: ConnectionTrait>(
        conn: &C,
        account_id: Uuid,
        subjects: Vec<String>,
    ) -> Result<(), DbErr> {
        let subjects: BTreeSet<String> = subjects.into_iter().collect();
        if subjects.is_empty() {
            return Ok(());
        }
        TutorSubjectEntity::insert_many(subjects.into_iter().map(|subject| tutor_subject::ActiveModel {
            account_id: ActiveValue::Set(account_id),
            subject: ActiveValue::Set(subject),
        }))
        .exec_without_returning(conn)
        .await?;
        Ok(())
    }

    pub async fn update<C: ConnectionTrait + TransactionTrait>(
        conn: &C,
        account_id: Uuid,
        changes: TutorProfileChanges,
    ) -> Result<Option<TutorProfile>, DbErr> {
        conn.transaction(|txn| {
            Box::pin(async move {
                let Some(profile) = TutorProfileEntity::find_by_id(account_id).one(txn).await? else {
                    return Ok(None);
                };

                let TutorProfileChanges {
                    bio,
                    hourly_rate,
                    subjects,
                    availability,
                } = changes;

                let profile = if bio.is_some() || hourly_rate.is_some() {
                    tutor_profile::ActiveModel {
                        account_id: ActiveValue::Unchanged(account_id),
                        bio: bio.map_or(NotSet, ActiveValue::Set),
                        hourly_rate: hourly_rate.map_or(NotSet, ActiveValue::Set),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?
                } else {
                    profile
                };

                if let Some(subjects) = subjects {
                    TutorSubjectEntity::delete_many()
                        .filter(tutor_subject::Column::AccountId.eq(account_id))
                        .exec(txn)
                        .await?;
                    Self::insert_subjects(txn, account_id, subjects).await?;
                    tracing::debug!(%account_id, "replaced tutor subjects");
                }

                if let Some(slots) = availability {
                    AvailabilityEntity::delete_many()
                        .filter(tutor_availability::Column::AccountId.eq(account_id))
                        .exec(txn)
                        .await?;
                    if !slots.is_empty() {
                        AvailabilityEntity::insert_many(slots.into_iter().map(|slot| {
                            tutor_availability::ActiveModel {
                                id: ActiveValue::Set(Uuid::new_v4()),
                                account_id: ActiveValue::Set(account_id),
                                day: ActiveValue::Set(slot.day),
                                start_time: ActiveValue::Set(slot.start_time),
                                end_time: ActiveValue::Set(slot.end_time),
                            }
                        }))
                        .exec_without_returning(txn)
                        .await?;
                    }
                    tracing::debug!(%account_id, "replaced tutor availability");
                }

                Ok::<_, DbErr>(Some(profile))
            })
        })
        .await
        .flatten_res()
    }
}
