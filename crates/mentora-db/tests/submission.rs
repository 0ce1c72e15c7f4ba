mod common;

use crate::common::{at, create_learner, create_tutor, setup_db};
use mentora_db::{message, submission};
use test_log::test;

#[test(tokio::test)]
async fn test_store_submission_and_message() {
    let db = &setup_db().await;
    let learner = create_learner(db, "learner@example.com").await;
    let tutor = create_tutor(db, "tutor@example.com").await;

    let stored = submission::Mutation::create(
        db,
        learner.id,
        "quiz-1".to_owned(),
        "https://files.example.com/answer.pdf".to_owned(),
        at(5),
    )
    .await
    .unwrap();
    assert_eq!(stored.assessment_id, "quiz-1");
    assert_eq!(stored.learner_id, learner.id);
    assert_eq!(stored.submission_url.as_deref(), Some("https://files.example.com/answer.pdf"));

    let sent = message::Mutation::create(db, learner.id, tutor.id, "Hello!".to_owned(), at(6))
        .await
        .unwrap();
    assert_eq!(sent.receiver_id, tutor.id);
    assert_eq!(sent.body, "Hello!");
}
