use crate::convert::FromDbModel;
use mentora_entity::course::Model as CourseModel;
use mentora_model::course::Course;

impl FromDbModel<(CourseModel, Vec<String>)> for Course {
    fn from_db_model((model, tags): (CourseModel, Vec<String>)) -> Self {
        Self {
            id: model.id,
            tutor_id: model.tutor_id,
            title: model.title,
            description: model.description,
            level: model.level,
            tags,
            published: model.published,
            created_at: model.created_at,
        }
    }
}
