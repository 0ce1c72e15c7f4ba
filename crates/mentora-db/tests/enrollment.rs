mod common;

use crate::common::{at, create_course, create_learner, create_tutor, setup_db};
use mentora_db::enrollment::{self, EnrollmentError};
use mentora_db::schema::setup_schema;
use mentora_db::{learner_profile, progress};
use sea_orm::prelude::Uuid;
use sea_orm::{ConnectOptions, Database};
use test_log::test;

#[test(tokio::test)]
async fn test_enroll_creates_progress_and_enrolled_entry() {
    let db = &setup_db().await;
    let tutor = create_tutor(db, "tutor@example.com").await;
    let learner = create_learner(db, "learner@example.com").await;
    let course = create_course(db, &tutor, &[], true).await;

    let enrolled = enrollment::Mutation::enroll(db, learner.id, course.id, at(10)).await.unwrap();
    assert_eq!(enrolled.learner_id, learner.id);
    assert_eq!(enrolled.course_id, course.id);
    assert_eq!(enrolled.enrolled_at, at(10));

    let record = progress::Query::find(db, learner.id, course.id).await.unwrap().unwrap();
    assert!(record.completed_modules.is_empty());
    assert_eq!(record.progress.last_accessed, None);

    let courses = learner_profile::Query::enrolled_courses(db, learner.id).await.unwrap();
    assert_eq!(courses, vec![course.id]);
}

#[test(tokio::test)]
async fn test_second_enrollment_is_rejected() {
    let db = &setup_db().await;
    let tutor = create_tutor(db, "tutor@example.com").await;
    let learner = create_learner(db, "learner@example.com").await;
    let course = create_course(db, &tutor, &[], true).await;

    let first = enrollment::Mutation::enroll(db, learner.id, course.id, at(10)).await.unwrap();
    progress::Mutation::mark_module_complete(db, learner.id, course.id, "m1".to_owned(), at(11))
        .await
        .unwrap();

    let second = enrollment::Mutation::enroll(db, learner.id, course.id, at(20)).await;
    assert!(matches!(second, Err(EnrollmentError::AlreadyEnrolled)));

    let stored = enrollment::Query::find(db, learner.id, course.id).await.unwrap().unwrap();
    assert_eq!(stored.id, first.id);
    assert_eq!(stored.enrolled_at, at(10));

    let record = progress::Query::find(db, learner.id, course.id).await.unwrap().unwrap();
    assert_eq!(record.completed_modules, vec!["m1".to_owned()]);
    assert_eq!(learner_profile::Query::enrolled_courses(db, learner.id).await.unwrap().len(), 1);
}

#[test(tokio::test)]
async fn test_enroll_requires_published_course() {
    let db = &setup_db().await;
    let tutor = create_tutor(db, "tutor@example.com").await;
    let learner = create_learner(db, "learner@example.com").await;
    let draft = create_course(db, &tutor, &[], false).await;

    let result = enrollment::Mutation::enroll(db, learner.id, draft.id, at(10)).await;
    assert!(matches!(result, Err(EnrollmentError::CourseNotFound)));

    let result = enrollment::Mutation::enroll(db, learner.id, Uuid::new_v4(), at(10)).await;
    assert!(matches!(result, Err(EnrollmentError::CourseNotFound)));

    assert!(progress::Query::for_learner(db, learner.id).await.unwrap().is_empty());
    assert!(learner_profile::Query::enrolled_courses(db, learner.id).await.unwrap().is_empty());
}

#[test(tokio::test)]
async fn test_enrollments_per_course_and_peers() {
    let db = &setup_db().await;
    let tutor = create_tutor(db, "tutor@example.com").await;
    let ada = create_learner(db, "ada@example.com").await;
    let bob = create_learner(db, "bob@example.com").await;
    let eve = create_learner(db, "eve@example.com").await;
    let shared = create_course(db, &tutor, &[], true).await;
    let solo = create_course(db, &tutor, &[], true).await;

    enrollment::Mutation::enroll(db, ada.id, shared.id, at(1)).await.unwrap();
    enrollment::Mutation::enroll(db, bob.id, shared.id, at(2)).await.unwrap();
    enrollment::Mutation::enroll(db, eve.id, solo.id, at(3)).await.unwrap();

    let all = enrollment::Query::for_courses(db, vec![shared.id, solo.id]).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].learner_id, ada.id);

    let peers = learner_profile::Query::find_peers(db, ada.id).await.unwrap();
    assert_eq!(peers.len(), 1);
    assert_eq!(peers[0].id, bob.id);

    let nobody = learner_profile::Query::find_peers(db, eve.id).await.unwrap();
    assert!(nobody.is_empty());
}

#[test(tokio::test(flavor = "multi_thread", worker_threads = 2))]
async fn test_concurrent_enrollments_store_one_row() {
    let path = std::env::temp_dir().join(format!("mentora-enroll-{}.db", Uuid::new_v4()));
    let mut options = ConnectOptions::new(format!("sqlite://{}?mode=rwc", path.display()));
    options.max_connections(4).sqlx_logging(false);
    let db = &Database::connect(options).await.unwrap();
    setup_schema(db).await.unwrap();

    let tutor = create_tutor(db, "tutor@example.com").await;
    let learner = create_learner(db, "learner@example.com").await;
    let course = create_course(db, &tutor, &[], true).await;

    let (first, second) = tokio::join!(
        enrollment::Mutation::enroll(db, learner.id, course.id, at(10)),
        enrollment::Mutation::enroll(db, learner.id, course.id, at(11)),
    );
    let winners = [&first, &second].iter().filter(|result| result.is_ok()).count();
    assert_eq!(winners, 1, "{first:?} / {second:?}");

    let enrollments = enrollment::Query::for_courses(db, vec![course.id]).await.unwrap();
    assert_eq!(enrollments.len(), 1);
    assert_eq!(learner_profile::Query::enrolled_courses(db, learner.id).await.unwrap(), vec![course.id]);
    assert_eq!(progress::Query::for_learner(db, learner.id).await.unwrap().len(), 1);

    let again = enrollment::Mutation::enroll(db, learner.id, course.id, at(12)).await;
    assert!(matches!(again, Err(EnrollmentError::AlreadyEnrolled)));

    db.clone().close().await.unwrap();
    let _ = std::fs::remove_file(&path);
}
