//! Append-only records that map one to one onto their API shape.

use crate::convert::FromDbModel;
use mentora_entity::assessment_submission::Model as SubmissionModel;
use mentora_entity::enrollment::Model as EnrollmentModel;
use mentora_entity::message::Model as MessageModel;
use mentora_model::assessment::Submission;
use mentora_model::enrollment::Enrollment;
use mentora_model::message::Message;

impl FromDbModel<EnrollmentModel> for Enrollment {
    fn from_db_model(model: EnrollmentModel) -> Self {
        Self {
            id: model.id,
            learner_id: model.learner_id,
            course_id: model.course_id,
            enrolled_at: model.enrolled_at,
        }
    }
}

impl FromDbModel<SubmissionModel> for Submission {
    fn from_db_model(model: SubmissionModel) -> Self {
        Self {
            id: model.id,
            assessment_id: model.assessment_id,
            learner_id: model.learner_id,
            submission_url: model.submission_url,
            created_at: model.created_at,
        }
    }
}

impl FromDbModel<MessageModel> for Message {
    fn from_db_model(model: MessageModel) -> Self {
        Self {
            id: model.id,
            sender_id: model.sender_id,
            receiver_id: model.receiver_id,
            message: model.body,
            created_at: model.created_at,
        }
    }
}
