pub mod account;
pub mod assessment_submission;
pub mod course;
pub mod course_tag;
pub mod enrollment;
pub mod learner_course;
pub mod learner_interest;
pub mod learner_profile;
pub mod message;
pub mod progress;
pub mod progress_module;
pub mod tutor_availability;
pub mod tutor_profile;
pub mod tutor_subject;
