// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    docs,
    error::AppError,
    handlers::{health, question, quiz},
    state::AppState,
};

/// Builds the CORS layer from the configured origin list.
/// Origins that are not valid header values are skipped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
        .allow_credentials(true)
}

async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

/// Assembles the main application router.
///
/// * Mounts `/health`, the versioned API under `/api/v1` and the OpenAPI document.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool, Config).
pub fn create_router(state: AppState) -> Router {
    let question_routes = Router::new()
        .route(
            "/",
            get(question::list_questions).post(question::create_question),
        )
        .route("/random", get(question::random_questions))
        .route(
            "/{id}",
            get(question::get_question).put(question::update_question),
        );

    let quiz_routes = Router::new()
        .route("/submit", post(quiz::submit_quiz))
        .route("/results/{id}", get(quiz::get_result))
        .route("/results/{id}/report", get(quiz::get_result_report))
        .route("/stats", get(quiz::get_stats));

    let api_routes = Router::new()
        .nest("/questions", question_routes)
        .nest("/quiz", quiz_routes);

    let cors = cors_layer(&state.config.cors_allowed_origins);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .nest("/api/v1", api_routes)
        .fallback(route_not_found)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
