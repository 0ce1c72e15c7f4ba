use crate::auth::{SessionConfig, SessionIssuer};
use crate::routes;
use axum::{Extension, Router};
use http::{Method, header};
use sea_orm::DatabaseConnection;
use sentry_tower::NewSentryLayer;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;


pub(crate) fn create_app(
    conn: DatabaseConnection,
    session: &SessionConfig,
    origins: &[String],
) -> anyhow::Result<Router> {
    if origins.is_empty() {
        tracing::warn!("no cors origins configured, browsers on other origins cannot send the session cookie");
    } else {
        tracing::info!(?origins, "allowing origins");
    }

    // Cookies only travel cross origin with credentials enabled, which rules out wildcard origins
    let cors = CorsLayer::new()
        .allow_origin(
            origins
                .iter()
                .map(|origin| origin.parse())
                .collect::<Result<Vec<_>, _>>()?,
        )
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE, header::COOKIE, header::ORIGIN])
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let app = Router::new()
        .merge(routes::swagger::create_router())
        .nest("/api", routes::api::create_router().layer(cors))
        .layer(
            // Router layers are called bottom to top
            // ServiceBuilder layers are called top to bottom
            ServiceBuilder::new()
                .layer(NewSentryLayer::new_from_top())
                .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
                .layer(TraceLayer::new_for_http())
                .layer(Extension(SessionIssuer::new(session)))
                .layer(Extension(conn)),
        )
        .with_state(());
    Ok(app)
}
