pub(crate) mod auth;
pub(crate) mod error;

use crate::permissions::ExtractTutor;
use crate::routes::api::tutor::error::TutorError;
use crate::routes::error::{ErrorData, ErrorKind, RequestError};
use crate::routes::login::missing_fields;
use crate::routes::response::{created, ok, ok_with_metadata};
use axum::extract::Path;
use axum::response::Response;
use axum::routing::{Router, get, patch, post};
use axum::{Extension, Json};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use mentora_db::course::{CourseChanges, NewCourse};
use mentora_db::tutor_profile::{NewSlot, TutorProfileChanges};
use mentora_db::{account, course, enrollment, progress, tutor_profile};
use mentora_entity::account::Model as AccountModel;
use mentora_model::course::{Course, ListMetadata};
use mentora_model::learner::Student;
use mentora_model::progress::Progress;
use mentora_model::response::ApiResponse;
use mentora_model::tutor::{AvailabilitySlot, Tutor};
use mentora_model_tools::convert::{IntoDbModel, IntoModel, TryIntoModel};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .nest(
            "/auth",
            Router::new()
                .route("/register", post(auth::register))
                .route("/login", post(auth::login))
                .route("/logout", post(auth::logout))
                .route("/me", get(get_profile)),
        )
        .route("/me", get(get_profile).patch(update_profile))
        .route("/courses", get(list_courses).post(create_course))
        .route("/courses/{course_id}", patch(update_course))
        .route("/students", get(list_students))
        .route("/students/{learner_id}/progress", get(student_progress))
}

async fn load_profile(conn: &DatabaseConnection, account: AccountModel) -> Result<Tutor, TutorError> {
    let profile = tutor_profile::Query::find(conn, account.id)
        .await?
        .ok_or(TutorError::NotFound("Tutor profile"))?;
    let subjects = tutor_profile::Query::subjects(conn, account.id).await?;
    let availability = tutor_profile::Query::availability(conn, account.id).await?;
    Ok((account, profile, subjects, availability).try_into_model()?)
}

#[utoipa::path(
    get,
    path = "/api/tutor/me",
    responses(
        (status = OK, description = "The tutor profile of the session account", body = ApiResponse<Tutor>),
        (status = UNAUTHORIZED, description = "No valid session", body = ErrorData<ErrorKind>),
        (status = FORBIDDEN, description = "Session account is not a tutor", body = ErrorData<ErrorKind>),
    ),
    tag = "tutor",
    security(
        ("cookie" = [])
    )
)]
pub(crate) async fn get_profile(
    ExtractTutor(tutor): ExtractTutor,
    Extension(conn): Extension<DatabaseConnection>,
) -> Result<Response, TutorError> {
    Ok(ok(load_profile(&conn, tutor).await?))
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ProfileUpdate {
    bio: Option<String>,
    subjects: Option<Vec<String>>,
    hourly_rate: Option<f64>,
    availability: Option<Vec<AvailabilitySlot>>,
}

#[utoipa::path(
    patch,
    path = "/api/tutor/me",
    request_body = ProfileUpdate,
    responses(
        (status = OK, description = "Updated tutor profile", body = ApiResponse<Tutor>),
        (status = BAD_REQUEST, description = "Invalid value", body = ErrorData<ErrorKind>),
    ),
    tag = "tutor",
    security(
        ("cookie" = [])
    )
)]
pub(crate) async fn update_profile(
    ExtractTutor(tutor): ExtractTutor,
    Extension(conn): Extension<DatabaseConnection>,
    WithRejection(Json(update), _): WithRejection<Json<ProfileUpdate>, RequestError>,
) -> Result<Response, TutorError> {
    if update.hourly_rate.is_some_and(|rate| !rate.is_finite() || rate < 0.0) {
        return Err(TutorError::InvalidField("hourlyRate"));
    }

    let changes = TutorProfileChanges {
        bio: update.bio,
        hourly_rate: update.hourly_rate,
        subjects: update.subjects,
        availability: update.availability.map(|slots| {
            slots
                .into_iter()
                .map(|slot| NewSlot {
                    day: slot.day.into_db_model(),
                    start_time: slot.start_time,
                    end_time: slot.end_time,
                })
                .collect()
        }),
    };
    tutor_profile::Mutation::update(&conn, tutor.id, changes)
        .await?
        .ok_or(TutorError::NotFound("Tutor profile"))?;

    Ok(ok(load_profile(&conn, tutor).await?))
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct CourseRequest {
    #[schema(example = "Intro to Rust")]
    title: Option<String>,
    description: Option<String>,
    #[schema(example = "beginner")]
    level: Option<String>,
    tags: Option<Vec<String>>,
    published: Option<bool>,
}

#[utoipa::path(
    post,
    path = "/api/tutor/courses",
    request_body = CourseRequest,
    responses(
        (status = CREATED, description = "Course created", body = ApiResponse<Course>),
        (status = BAD_REQUEST, description = "Missing title", body = ErrorData<ErrorKind>),
    ),
    tag = "tutor",
    security(
        ("cookie" = [])
    )
)]
pub(crate) async fn create_course(
    ExtractTutor(tutor): ExtractTutor,
    Extension(conn): Extension<DatabaseConnection>,
    WithRejection(Json(request), _): WithRejection<Json<CourseRequest>, RequestError>,
) -> Result<Response, TutorError> {
    let missing = missing_fields(&[("title", request.title.as_deref())]);
    let Some(title) = request.title.filter(|_| missing.is_empty()) else {
        return Err(TutorError::MissingFields(missing));
    };
    let created_course = course::Mutation::create(
        &conn,
        tutor.id,
        NewCourse {
            title,
            description: request.description,
            level: request.level,
            tags: request.tags.unwrap_or_default(),
            published: request.published.unwrap_or(false),
        },
        Utc::now(),
    )
    .await?;

    let tags = course_tags(&conn, created_course.id).await?;
    let course: Course = (created_course, tags).into_model();
    Ok(created(course))
}

#[utoipa::path(
    get,
    path = "/api/tutor/courses",
    responses(
        (status = OK, description = "All courses of the tutor, published or not", body = ApiResponse<Vec<Course>>),
    ),
    tag = "tutor",
    security(
        ("cookie" = [])
    )
)]
pub(crate) async fn list_courses(
    ExtractTutor(tutor): ExtractTutor,
    Extension(conn): Extension<DatabaseConnection>,
) -> Result<Response, TutorError> {
    let courses = course::Query::list_by_tutor(&conn, tutor.id).await?;
    let mut tags = course::Query::tags_for(&conn, courses.iter().map(|course| course.id).collect()).await?;
    let courses: Vec<Course> = courses
        .into_iter()
        .map(|course| {
            let course_tags = tags.remove(&course.id).unwrap_or_default();
            (course, course_tags).into_model()
        })
        .collect();
    let metadata = ListMetadata { count: courses.len() };
    Ok(ok_with_metadata(courses, &metadata))
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct CourseUpdate {
    title: Option<String>,
    /// `null` clears the description
    #[serde(with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    description: Option<Option<String>>,
    /// `null` clears the level
    #[serde(with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    level: Option<Option<String>>,
    tags: Option<Vec<String>>,
    published: Option<bool>,
}

#[utoipa::path(
    patch,
    path = "/api/tutor/courses/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course of the tutor")),
    request_body = CourseUpdate,
    responses(
        (status = OK, description = "Updated course", body = ApiResponse<Course>),
        (status = NOT_FOUND, description = "No such course owned by this tutor", body = ErrorData<ErrorKind>),
    ),
    tag = "tutor",
    security(
        ("cookie" = [])
    )
)]
pub(crate) async fn update_course(
    ExtractTutor(tutor): ExtractTutor,
    Extension(conn): Extension<DatabaseConnection>,
    WithRejection(Path(course_id), _): WithRejection<Path<Uuid>, RequestError>,
    WithRejection(Json(update), _): WithRejection<Json<CourseUpdate>, RequestError>,
) -> Result<Response, TutorError> {
    if update.title.as_deref().is_some_and(str::is_empty) {
        return Err(TutorError::InvalidField("title"));
    }

    let changes = CourseChanges {
        title: update.title,
        description: update.description,
        level: update.level,
        tags: update.tags,
        published: update.published,
    };
    let updated = course::Mutation::update(&conn, tutor.id, course_id, changes)
        .await?
        .ok_or(TutorError::NotFound("Course"))?;

    let tags = course_tags(&conn, updated.id).await?;
    let course: Course = (updated, tags).into_model();
    Ok(ok(course))
}

async fn course_tags(conn: &DatabaseConnection, course_id: Uuid) -> Result<Vec<String>, TutorError> {
    Ok(course::Query::tags_for(conn, vec![course_id])
        .await?
        .remove(&course_id)
        .unwrap_or_default())
}

async fn owned_course_ids(conn: &DatabaseConnection, tutor_id: Uuid) -> Result<Vec<Uuid>, TutorError> {
    Ok(course::Query::list_by_tutor(conn, tutor_id)
        .await?
        .into_iter()
        .map(|course| course.id)
        .collect())
}

#[utoipa::path(
    get,
    path = "/api/tutor/students",
    responses(
        (status = OK, description = "Learners enrolled in any course of the tutor", body = ApiResponse<Vec<Student>>),
    ),
    tag = "tutor",
    security(
        ("cookie" = [])
    )
)]
pub(crate) async fn list_students(
    ExtractTutor(tutor): ExtractTutor,
    Extension(conn): Extension<DatabaseConnection>,
) -> Result<Response, TutorError> {
    let course_ids = owned_course_ids(&conn, tutor.id).await?;
    let enrollments = enrollment::Query::for_courses(&conn, course_ids).await?;

    let mut courses_by_learner: BTreeMap<Uuid, Vec<Uuid>> = BTreeMap::new();
    for enrollment in enrollments {
        courses_by_learner
            .entry(enrollment.learner_id)
            .or_default()
            .push(enrollment.course_id);
    }

    let mut learners = account::Query::find_many(&conn, courses_by_learner.keys().copied().collect()).await?;
    learners.sort_by(|a, b| a.name.cmp(&b.name));

    let students: Vec<Student> = learners
        .into_iter()
        .map(|learner| {
            let course_ids = courses_by_learner.remove(&learner.id).unwrap_or_default();
            (learner, course_ids).into_model()
        })
        .collect();
    Ok(ok(students))
}

#[utoipa::path(
    get,
    path = "/api/tutor/students/{learner_id}/progress",
    params(("learner_id" = Uuid, Path, description = "Learner enrolled in a course of the tutor")),
    responses(
        (status = OK, description = "Progress of the learner in the tutor's courses", body = ApiResponse<Vec<Progress>>),
        (status = NOT_FOUND, description = "The learner is not enrolled in any course of the tutor", body = ErrorData<ErrorKind>),
    ),
    tag = "tutor",
    security(
        ("cookie" = [])
    )
)]
pub(crate) async fn student_progress(
    ExtractTutor(tutor): ExtractTutor,
    Extension(conn): Extension<DatabaseConnection>,
    WithRejection(Path(learner_id), _): WithRejection<Path<Uuid>, RequestError>,
) -> Result<Response, TutorError> {
    let course_ids = owned_course_ids(&conn, tutor.id).await?;
    let records = progress::Query::for_learner_in_courses(&conn, learner_id, course_ids).await?;
    if records.is_empty() {
        return Err(TutorError::NotFound("Student"));
    }
    let progress: Vec<Progress> = records.into_iter().map(IntoModel::into_model).collect();
    Ok(ok(progress))
}
