pub(crate) mod auth;
pub(crate) mod error;

use crate::permissions::ExtractLearner;
use crate::routes::api::learner::error::LearnerError;
use crate::routes::error::{ErrorData, ErrorKind, RequestError};
use crate::routes::login::missing_fields;
use crate::routes::response::{created, ok, ok_with_metadata};
use axum::extract::{Path, Query};
use axum::response::Response;
use axum::routing::{Router, get, patch, post};
use axum::{Extension, Json};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use mentora_db::course::CourseFilter;
use mentora_db::{account, course, enrollment, learner_profile, message, progress, submission};
use mentora_model::assessment::{Assessment, Submission};
use mentora_model::course::{Course, ListMetadata};
use mentora_model::enrollment::Enrollment;
use mentora_model::learner::Peer;
use mentora_model::message::Message;
use mentora_model::progress::Progress;
use mentora_model::response::ApiResponse;
use mentora_model_tools::convert::{FromDbModel, IntoModel};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

const ASSESSMENT_TITLE: &str = "Sample Assessment";

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
                .route("/me", get(auth::me)),
        )
        .route("/courses", get(list_courses))
        .route("/courses/{course_id}/enroll", post(enroll))
        .route("/me/progress", get(list_progress))
        .route("/me/progress/{course_id}", patch(update_progress))
        .route("/assessments/{assessment_id}", get(get_assessment))
        .route("/assessments/{assessment_id}/submit", post(submit_assessment))
        .route("/peers", get(list_peers))
        .route("/messages", post(send_message))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct CourseQuery {
    /// Only courses tagged with this subject
    subject: Option<String>,
    level: Option<String>,
    /// Only courses of this tutor
    tutor: Option<Uuid>,
}

#[utoipa::path(
    get,
    path = "/api/learner/courses",
    params(CourseQuery),
    responses(
        (status = OK, description = "Published courses matching the filters", body = ApiResponse<Vec<Course>>),
        (status = BAD_REQUEST, description = "Malformed filter", body = ErrorData<ErrorKind>),
    ),
    tag = "learner"
)]
pub(crate) async fn list_courses(
    Extension(conn): Extension<DatabaseConnection>,
    WithRejection(Query(query), _): WithRejection<Query<CourseQuery>, RequestError>,
) -> Result<Response, LearnerError> {
    let filter = CourseFilter {
        tag: query.subject,
        level: query.level,
        tutor_id: query.tutor,
    };
    let courses = course::Query::list_published(&conn, filter).await?;
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

#[utoipa::path(
    post,
    path = "/api/learner/courses/{course_id}/enroll",
    params(("course_id" = Uuid, Path, description = "Course to enroll in")),
    responses(
        (status = CREATED, description = "Enrolled, progress tracking started", body = ApiResponse<Enrollment>),
        (status = BAD_REQUEST, description = "Already enrolled", body = ErrorData<ErrorKind>),
        (status = UNAUTHORIZED, description = "No valid session", body = ErrorData<ErrorKind>),
        (status = FORBIDDEN, description = "Session account is not a learner", body = ErrorData<ErrorKind>),
        (status = NOT_FOUND, description = "No published course with this id", body = ErrorData<ErrorKind>),
    ),
    tag = "learner",
    security(
        ("cookie" = [])
    )
)]
pub(crate) async fn enroll(
    ExtractLearner(learner): ExtractLearner,
    Extension(conn): Extension<DatabaseConnection>,
    WithRejection(Path(course_id), _): WithRejection<Path<Uuid>, RequestError>,
) -> Result<Response, LearnerError> {
    let enrollment = enrollment::Mutation::enroll(&conn, learner.id, course_id, Utc::now()).await?;
    Ok(created(Enrollment::from_db_model(enrollment)))
}

#[utoipa::path(
    get,
    path = "/api/learner/me/progress",
    responses(
        (status = OK, description = "Progress in every enrolled course", body = ApiResponse<Vec<Progress>>),
        (status = UNAUTHORIZED, description = "No valid session", body = ErrorData<ErrorKind>),
        (status = FORBIDDEN, description = "Session account is not a learner", body = ErrorData<ErrorKind>),
    ),
    tag = "learner",
    security(
        ("cookie" = [])
    )
)]
pub(crate) async fn list_progress(
    ExtractLearner(learner): ExtractLearner,
    Extension(conn): Extension<DatabaseConnection>,
) -> Result<Response, LearnerError> {
    let records = progress::Query::for_learner(&conn, learner.id).await?;
    let progress: Vec<Progress> = records.into_iter().map(IntoModel::into_model).collect();
    Ok(ok(progress))
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ProgressUpdate {
    #[schema(example = "module-1")]
    module_id: Option<String>,
}

#[utoipa::path(
    patch,
    path = "/api/learner/me/progress/{course_id}",
    params(("course_id" = Uuid, Path, description = "Enrolled course")),
    request_body = ProgressUpdate,
    responses(
        (status = OK, description = "Module marked as completed", body = ApiResponse<Progress>),
        (status = BAD_REQUEST, description = "Missing module id", body = ErrorData<ErrorKind>),
        (status = NOT_FOUND, description = "Not enrolled in this course", body = ErrorData<ErrorKind>),
    ),
    tag = "learner",
    security(
        ("cookie" = [])
    )
)]
pub(crate) async fn update_progress(
    ExtractLearner(learner): ExtractLearner,
    Extension(conn): Extension<DatabaseConnection>,
    WithRejection(Path(course_id), _): WithRejection<Path<Uuid>, RequestError>,
    WithRejection(Json(update), _): WithRejection<Json<ProgressUpdate>, RequestError>,
) -> Result<Response, LearnerError> {
    let missing = missing_fields(&[("moduleId", update.module_id.as_deref())]);
    let Some(module_id) = update.module_id.filter(|_| missing.is_empty()) else {
        return Err(LearnerError::MissingFields(missing));
    };

    let record = progress::Mutation::mark_module_complete(&conn, learner.id, course_id, module_id, Utc::now())
        .await?
        .ok_or(LearnerError::NotFound("Progress"))?;
    Ok(ok(Progress::from_db_model(record)))
}

#[utoipa::path(
    get,
    path = "/api/learner/assessments/{assessment_id}",
    params(("assessment_id" = String, Path, description = "Assessment id")),
    responses(
        (status = OK, description = "Assessment descriptor", body = ApiResponse<Assessment>),
    ),
    tag = "learner",
    security(
        ("cookie" = [])
    )
)]
pub(crate) async fn get_assessment(
    ExtractLearner(_learner): ExtractLearner,
    WithRejection(Path(assessment_id), _): WithRejection<Path<String>, RequestError>,
) -> Response {
    ok(Assessment {
        id: assessment_id,
        title: ASSESSMENT_TITLE.to_owned(),
    })
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct SubmissionRequest {
    #[schema(example = "https://files.example.com/answers.pdf")]
    submission_url: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/learner/assessments/{assessment_id}/submit",
    params(("assessment_id" = String, Path, description = "Assessment id")),
    request_body = SubmissionRequest,
    responses(
        (status = CREATED, description = "Submission stored", body = ApiResponse<Submission>),
        (status = BAD_REQUEST, description = "Missing submission url", body = ErrorData<ErrorKind>),
    ),
    tag = "learner",
    security(
        ("cookie" = [])
    )
)]
pub(crate) async fn submit_assessment(
    ExtractLearner(learner): ExtractLearner,
    Extension(conn): Extension<DatabaseConnection>,
    WithRejection(Path(assessment_id), _): WithRejection<Path<String>, RequestError>,
    WithRejection(Json(request), _): WithRejection<Json<SubmissionRequest>, RequestError>,
) -> Result<Response, LearnerError> {
    let missing = missing_fields(&[("submissionUrl", request.submission_url.as_deref())]);
    let Some(submission_url) = request.submission_url.filter(|_| missing.is_empty()) else {
        return Err(LearnerError::MissingFields(missing));
    };

    let stored = submission::Mutation::create(&conn, learner.id, assessment_id, submission_url, Utc::now()).await?;
    Ok(created(Submission::from_db_model(stored)))
}

#[utoipa::path(
    get,
    path = "/api/learner/peers",
    responses(
        (status = OK, description = "Learners sharing at least one course", body = ApiResponse<Vec<Peer>>),
    ),
    tag = "learner",
    security(
        ("cookie" = [])
    )
)]
pub(crate) async fn list_peers(
    ExtractLearner(learner): ExtractLearner,
    Extension(conn): Extension<DatabaseConnection>,
) -> Result<Response, LearnerError> {
    let peers = learner_profile::Query::find_peers(&conn, learner.id).await?;
    let peers: Vec<Peer> = peers.into_iter().map(IntoModel::into_model).collect();
    Ok(ok(peers))
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct MessageRequest {
    receiver_id: Option<Uuid>,
    #[schema(example = "Want to study together?")]
    message: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/learner/messages",
    request_body = MessageRequest,
    responses(
        (status = CREATED, description = "Message stored", body = ApiResponse<Message>),
        (status = BAD_REQUEST, description = "Missing receiver or message", body = ErrorData<ErrorKind>),
        (status = NOT_FOUND, description = "Receiver does not exist", body = ErrorData<ErrorKind>),
    ),
    tag = "learner",
    security(
        ("cookie" = [])
    )
)]
pub(crate) async fn send_message(
    ExtractLearner(learner): ExtractLearner,
    Extension(conn): Extension<DatabaseConnection>,
    WithRejection(Json(request), _): WithRejection<Json<MessageRequest>, RequestError>,
) -> Result<Response, LearnerError> {
    let receiver = request.receiver_id.map(|id| id.to_string());
    let missing = missing_fields(&[
        ("receiverId", receiver.as_deref()),
        ("message", request.message.as_deref()),
    ]);
    let (Some(receiver_id), Some(body)) = (request.receiver_id, request.message) else {
        return Err(LearnerError::MissingFields(missing));
    };
    if !missing.is_empty() {
        return Err(LearnerError::MissingFields(missing));
    }

    if account::Query::find_by_id(&conn, receiver_id).await?.is_none() {
        return Err(LearnerError::NotFound("Receiver"));
    }
    let sent = message::Mutation::create(&conn, learner.id, receiver_id, body, Utc::now()).await?;
    tracing::debug!(message = %sent.id, sender = %learner.id, %receiver_id, "message stored");
    Ok(created(Message::from_db_model(sent)))
}
