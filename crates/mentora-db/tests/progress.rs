mod common;

use crate::common::{at, create_course, create_learner, create_tutor, setup_db};
use mentora_db::{enrollment, progress};
use test_log::test;

#[test(tokio::test)]
async fn test_mark_module_complete_is_idempotent() {
    let db = &setup_db().await;
    let tutor = create_tutor(db, "tutor@example.com").await;
    let learner = create_learner(db, "learner@example.com").await;
    let course = create_course(db, &tutor, &[], true).await;
    enrollment::Mutation::enroll(db, learner.id, course.id, at(10)).await.unwrap();

    let first = progress::Mutation::mark_module_complete(db, learner.id, course.id, "m1".to_owned(), at(20))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.completed_modules, vec!["m1".to_owned()]);
    assert_eq!(first.progress.last_accessed, Some(at(20)));

    let second = progress::Mutation::mark_module_complete(db, learner.id, course.id, "m1".to_owned(), at(30))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.completed_modules, vec!["m1".to_owned()]);
    assert_eq!(second.progress.last_accessed, Some(at(30)));

    let third = progress::Mutation::mark_module_complete(db, learner.id, course.id, "m2".to_owned(), at(40))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(third.completed_modules, vec!["m1".to_owned(), "m2".to_owned()]);
}

#[test(tokio::test)]
async fn test_mark_module_without_enrollment() {
    let db = &setup_db().await;
    let tutor = create_tutor(db, "tutor@example.com").await;
    let learner = create_learner(db, "learner@example.com").await;
    let course = create_course(db, &tutor, &[], true).await;

    let result = progress::Mutation::mark_module_complete(db, learner.id, course.id, "m1".to_owned(), at(20))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[test(tokio::test)]
async fn test_progress_limited_to_courses() {
    let db = &setup_db().await;
    let tutor = create_tutor(db, "tutor@example.com").await;
    let other = create_tutor(db, "other@example.com").await;
    let learner = create_learner(db, "learner@example.com").await;
    let mine = create_course(db, &tutor, &[], true).await;
    let theirs = create_course(db, &other, &[], true).await;
    enrollment::Mutation::enroll(db, learner.id, mine.id, at(10)).await.unwrap();
    enrollment::Mutation::enroll(db, learner.id, theirs.id, at(11)).await.unwrap();
    progress::Mutation::mark_module_complete(db, learner.id, theirs.id, "secret".to_owned(), at(12))
        .await
        .unwrap();

    assert_eq!(progress::Query::for_learner(db, learner.id).await.unwrap().len(), 2);

    let visible = progress::Query::for_learner_in_courses(db, learner.id, vec![mine.id]).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].progress.course_id, mine.id);
    assert!(visible[0].completed_modules.is_empty());

    assert!(progress::Query::for_learner_in_courses(db, learner.id, vec![]).await.unwrap().is_empty());
}
