use super::api::{learner, tutor};

use axum::Router;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

struct SecurityAddon;

#[derive(OpenApi)]
#[openapi(
    paths(
        learner::auth::register,
        learner::auth::login,
        learner::auth::logout,
        learner::auth::me,
        learner::list_courses,
        learner::enroll,
        learner::list_progress,
        learner::update_progress,
        learner::get_assessment,
        learner::submit_assessment,
        learner::list_peers,
        learner::send_message,
        tutor::auth::register,
        tutor::auth::login,
        tutor::auth::logout,
        tutor::get_profile,
        tutor::update_profile,
        tutor::create_course,
        tutor::list_courses,
        tutor::update_course,
        tutor::list_students,
        tutor::student_progress,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "learner/auth", description = "Learner accounts and sessions"),
        (name = "learner", description = "Course catalogue, enrollment and progress"),
        (name = "tutor/auth", description = "Tutor accounts and sessions"),
        (name = "tutor", description = "Tutor profile, courses and students"),
    )
)]
struct ApiDoc;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                crate::cookie::SESSION_COOKIE,
                "Session token issued on register and login",
            ))),
        );
    }
}

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        // RapiDoc reuses the document served for the swagger ui
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/learner/courses/{course_id}/enroll"));
        assert!(doc.paths.paths.contains_key("/api/tutor/students/{learner_id}/progress"));
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("cookie"));
    }
}
