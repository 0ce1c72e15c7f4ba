pub(crate) mod learner;
pub(crate) mod tutor;

use axum::Router;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .nest("/learner", learner::create_router())
        .nest("/tutor", tutor::create_router())
}
