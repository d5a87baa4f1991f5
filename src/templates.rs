// src/templates.rs

use std::sync::Arc;

use axum::response::Html;
use minijinja::Environment;
use serde::Serialize;

use crate::error::AppError;

/// Templates compiled into the binary, registered under their file names.
const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("home.html", include_str!("../templates/home.html")),
    ("feedback.html", include_str!("../templates/feedback.html")),
    (
        "feedback_submitted.html",
        include_str!("../templates/feedback_submitted.html"),
    ),
    ("quiz_config.html", include_str!("../templates/quiz_config.html")),
    ("question_list.html", include_str!("../templates/question_list.html")),
    ("question.html", include_str!("../templates/question.html")),
    ("result.html", include_str!("../templates/result.html")),
    (
        "partials/question_rows.html",
        include_str!("../templates/partials/question_rows.html"),
    ),
    (
        "partials/result.html",
        include_str!("../templates/partials/result.html"),
    ),
];

/// Parsed HTML templates, shared read-only by all handlers.
///
/// Names end in `.html`, so every interpolated value is HTML-escaped.
#[derive(Clone)]
pub struct Templates {
    env: Arc<Environment<'static>>,
}

impl Templates {
    /// Parses every template up front. A syntax error fails startup.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env: Arc::new(env) })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<Html<String>, AppError> {
        let template = self.env.get_template(name)?;
        let body = template.render(ctx)?;
        Ok(Html(body))
    }
}
