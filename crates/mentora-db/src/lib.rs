pub mod account;
pub mod course;
pub mod enrollment;
pub mod learner_profile;
pub mod message;
pub mod progress;
pub mod schema;
pub mod submission;
pub mod tutor_profile;
pub mod util;

pub use sea_orm;
