use crate::convert::FromDbModel;
use mentora_db::progress::ProgressRecord;
use mentora_model::progress::Progress;

impl FromDbModel<ProgressRecord> for Progress {
    fn from_db_model(record: ProgressRecord) -> Self {
        Self {
            learner_id: record.progress.learner_id,
            course_id: record.progress.course_id,
            completed_modules: record.completed_modules,
            last_accessed: record.progress.last_accessed,
        }
    }
}
