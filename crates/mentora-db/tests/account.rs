mod common;

use crate::common::{at, create_learner, create_tutor, setup_db};
use mentora_db::account::{self, AccountError, NewAccount, TutorDetails};
use mentora_db::{learner_profile, tutor_profile};
use mentora_entity::account::Role;
use mentora_entity::tutor_availability::Weekday;
use test_log::test;

#[test(tokio::test)]
async fn test_create_learner_with_profile() {
    let db = &setup_db().await;

    let learner = account::Mutation::create_learner(
        db,
        NewAccount {
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            password_hash: "hash".to_owned(),
        },
        vec!["math".to_owned(), "art".to_owned(), "math".to_owned()],
        at(0),
    )
    .await
    .unwrap();
    assert_eq!(learner.role, Role::Learner);

    let found = account::Query::find_by_email(db, "ada@example.com").await.unwrap().unwrap();
    assert_eq!(found.id, learner.id);

    assert!(learner_profile::Query::find(db, learner.id).await.unwrap().is_some());
    let interests = learner_profile::Query::interests(db, learner.id).await.unwrap();
    assert_eq!(interests, vec!["art".to_owned(), "math".to_owned()]);
    assert!(learner_profile::Query::enrolled_courses(db, learner.id).await.unwrap().is_empty());
}

#[test(tokio::test)]
async fn test_duplicate_email_is_rejected() {
    let db = &setup_db().await;
    create_learner(db, "taken@example.com").await;

    let result = account::Mutation::create_tutor(
        db,
        NewAccount {
            name: "Other".to_owned(),
            email: "taken@example.com".to_owned(),
            password_hash: "hash".to_owned(),
        },
        TutorDetails::default(),
        at(0),
    )
    .await;
    assert!(matches!(result, Err(AccountError::EmailTaken)));

    // the failed registration must not leave a tutor profile behind
    let accounts = account::Query::find_by_email(db, "taken@example.com").await.unwrap().unwrap();
    assert_eq!(accounts.role, Role::Learner);
    assert!(tutor_profile::Query::find(db, accounts.id).await.unwrap().is_none());
}

#[test(tokio::test)]
async fn test_tutor_profile_defaults_and_update() {
    let db = &setup_db().await;
    let tutor = create_tutor(db, "tutor@example.com").await;

    let profile = tutor_profile::Query::find(db, tutor.id).await.unwrap().unwrap();
    assert_eq!(profile.rating, 0.0);
    assert_eq!(profile.review_count, 0);
    assert!(!profile.verified);

    let updated = tutor_profile::Mutation::update(
        db,
        tutor.id,
        tutor_profile::TutorProfileChanges {
            bio: Some("Patient mentor".to_owned()),
            hourly_rate: Some(42.5),
            subjects: Some(vec!["physics".to_owned(), "chemistry".to_owned()]),
            availability: Some(vec![tutor_profile::NewSlot {
                day: Weekday::Monday,
                start_time: "09:00".to_owned(),
                end_time: "12:00".to_owned(),
            }]),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.bio, "Patient mentor");
    assert_eq!(updated.hourly_rate, 42.5);

    let subjects = tutor_profile::Query::subjects(db, tutor.id).await.unwrap();
    assert_eq!(subjects, vec!["chemistry".to_owned(), "physics".to_owned()]);
    let slots = tutor_profile::Query::availability(db, tutor.id).await.unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].day, Weekday::Monday);

    // only the subjects are replaced, the rest stays
    tutor_profile::Mutation::update(
        db,
        tutor.id,
        tutor_profile::TutorProfileChanges {
            subjects: Some(vec!["biology".to_owned()]),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let subjects = tutor_profile::Query::subjects(db, tutor.id).await.unwrap();
    assert_eq!(subjects, vec!["biology".to_owned()]);
    let profile = tutor_profile::Query::find(db, tutor.id).await.unwrap().unwrap();
    assert_eq!(profile.bio, "Patient mentor");
    assert_eq!(tutor_profile::Query::availability(db, tutor.id).await.unwrap().len(), 1);
}

#[test(tokio::test)]
async fn test_update_missing_tutor_profile() {
    let db = &setup_db().await;
    let learner = create_learner(db, "learner@example.com").await;

    let result = tutor_profile::Mutation::update(
        db,
        learner.id,
        tutor_profile::TutorProfileChanges {
            bio: Some("nope".to_owned()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(result.is_none());
}
