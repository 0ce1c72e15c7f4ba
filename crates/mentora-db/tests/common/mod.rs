use chrono::{DateTime, TimeZone, Utc};
use mentora_db::account::{self, NewAccount, TutorDetails};
use mentora_db::course::{self, NewCourse};
use mentora_db::schema::setup_schema;
use mentora_entity::account::Model as Account;
use mentora_entity::course::Model as Course;
use sea_orm::{Database, DatabaseConnection};

pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    setup_schema(&db).await.unwrap();
    db
}

#[allow(dead_code)]
pub fn at(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
}

fn new_account(name: &str, email: &str) -> NewAccount {
    NewAccount {
        name: name.to_owned(),
        email: email.to_owned(),
        password_hash: "not-a-real-hash".to_owned(),
    }
}

#[allow(dead_code)]
pub async fn create_learner(db: &DatabaseConnection, email: &str) -> Account {
    account::Mutation::create_learner(db, new_account("Learner", email), vec![], at(0))
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn create_tutor(db: &DatabaseConnection, email: &str) -> Account {
    account::Mutation::create_tutor(db, new_account("Tutor", email), TutorDetails::default(), at(0))
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn create_course(db: &DatabaseConnection, tutor: &Account, tags: &[&str], published: bool) -> Course {
    course::Mutation::create(
        db,
        tutor.id,
        NewCourse {
            title: "Intro to Rust".to_owned(),
            description: None,
            level: Some("beginner".to_owned()),
            tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
            published,
        },
        at(1),
    )
    .await
    .unwrap()
}
