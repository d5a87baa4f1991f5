// src/handlers/feedback.rs

use std::sync::Arc;

use axum::{Form, extract::State, response::Html};
use minijinja::context;
use validator::Validate;

use crate::{
    error::AppError,
    models::feedback::{Feedback, FeedbackForm},
    service::Service,
    templates::Templates,
    utils::html::clean_html,
};

/// Renders the feedback form.
pub async fn feedback_form(State(templates): State<Templates>) -> Result<Html<String>, AppError> {
    templates.render("feedback.html", context! {})
}

/// Stores a feedback submission and renders the confirmation.
///
/// * Missing fields are stored as empty strings.
/// * Overlong fields are rejected with 400.
/// * The free text is sanitized before it is stored.
pub async fn submit_feedback(
    State(service): State<Arc<dyn Service>>,
    State(templates): State<Templates>,
    Form(form): Form<FeedbackForm>,
) -> Result<Html<String>, AppError> {
    form.validate()?;

    let mut feedback = Feedback::from(form);
    feedback.text = clean_html(&feedback.text);

    service.submit_feedback(&feedback).await?;
    tracing::info!(topic = %feedback.topic, "Feedback received");

    templates.render("feedback_submitted.html", context! { name => feedback.name })
}
