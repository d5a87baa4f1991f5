// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    extract::{RawQuery, State},
    response::Html,
};
use minijinja::context;

use crate::{error::AppError, service::Service, templates::Templates, utils::params::Params};

/// Settings chosen on the quiz configuration page.
#[derive(Debug, PartialEq)]
pub struct QuizSettings {
    /// Randomization seed, the config page proposes the current Unix time in ms.
    pub seed: i64,
    pub rules: Vec<String>,
    pub negative_marking: bool,
    /// Minutes.
    pub duration: i64,
    pub num_questions: i64,
}

impl QuizSettings {
    pub fn from_params(params: &Params) -> Self {
        Self {
            seed: params.int("seed", 0),
            rules: params.list("rules"),
            negative_marking: params.bool("negative-marking", false),
            duration: params.int("duration", 0),
            num_questions: params.int("num-questions", 0),
        }
    }
}

/// Renders the quiz configuration form.
/// Offers every rule as a filter and a fresh seed derived from the clock.
pub async fn quiz_config(
    State(service): State<Arc<dyn Service>>,
    State(templates): State<Templates>,
) -> Result<Html<String>, AppError> {
    let rules = service.get_all_rules().await?;
    let seed = chrono::Utc::now().timestamp_millis();

    templates.render(
        "quiz_config.html",
        context! {
            seed => seed.to_string(),
            rules => rules,
        },
    )
}

/// Accepts the quiz settings. Only acknowledges them for now.
pub async fn do_quiz(RawQuery(query): RawQuery) -> &'static str {
    let settings = QuizSettings::from_params(&Params::from_query(query.as_deref()));

    tracing::info!(
        seed = settings.seed,
        rules = ?settings.rules,
        negative_marking = settings.negative_marking,
        duration = settings.duration,
        num_questions = settings.num_questions,
        "Quiz requested"
    );

    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_parse_with_defaults() {
        let params = Params::parse(
            "seed=1700000000000&rules=goal-area&rules=throw-in&negative-marking=on&num-questions=x",
        );

        assert_eq!(
            QuizSettings::from_params(&params),
            QuizSettings {
                seed: 1_700_000_000_000,
                rules: vec!["goal-area".into(), "throw-in".into()],
                negative_marking: true,
                duration: 0,
                num_questions: 0,
            }
        );
    }
}
