// src/routes.rs

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{feedback, health, home, question, quiz},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Registers the page, quiz and question routes.
/// * Serves static assets from the configured directory under `/static`.
/// * Applies request tracing.
pub fn create_router(state: AppState) -> Router {
    let question_routes = Router::new()
        .route("/", get(question::question_list))
        .route("/random", get(question::random_question))
        .route("/{id}", get(question::question_by_id));

    let quiz_routes = Router::new()
        .route("/", get(quiz::do_quiz))
        .route("/config", get(quiz::quiz_config));

    Router::new()
        .route("/", get(home::home))
        .route(
            "/feedback",
            get(feedback::feedback_form).post(feedback::submit_feedback),
        )
        .route("/submit/{question_id}", post(question::submit_answer))
        .route("/health", get(health::health))
        .nest("/questions", question_routes)
        .nest("/quiz", quiz_routes)
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        // Global Middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
