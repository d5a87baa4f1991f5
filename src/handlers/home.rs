// src/handlers/home.rs

use std::sync::Arc;

use axum::{extract::State, response::Html};
use minijinja::context;

use crate::{
    error::AppError, models::question::QuestionSummary, service::Service, templates::Templates,
};

/// Landing page listing every question with its correct options.
pub async fn home(
    State(service): State<Arc<dyn Service>>,
    State(templates): State<Templates>,
) -> Result<Html<String>, AppError> {
    let questions = service.get_all_questions().await?;

    templates.render(
        "home.html",
        context! { questions => QuestionSummary::from_questions(questions) },
    )
}
