pub mod account;
pub mod assessment;
pub mod course;
pub mod enrollment;
pub mod learner;
pub mod message;
pub mod progress;
pub mod response;
pub mod tutor;
