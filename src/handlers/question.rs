// src/handlers/question.rs

use std::sync::Arc;

use axum::{
    extract::{Path, RawQuery, State},
    http::HeaderMap,
    response::Html,
};
use minijinja::context;

use super::is_htmx;
use crate::{
    error::AppError,
    models::question::{AnswerResult, LoadMoreParam, Question, QuestionListItem},
    service::Service,
    templates::Templates,
    utils::params::Params,
};

/// Rows per page of the question list.
pub const PAGE_SIZE: i64 = 10;

/// Paginated, searchable question list.
///
/// Query parameters:
/// * `search`: case-insensitive match on the question text.
/// * `rules`: optional rule filter, repeatable and comma-separated.
/// * `lastRuleSortOrder`, `lastQuestionNumber`: cursor of the previous page (default 0).
///
/// htmx requests get only the rows plus the next "load more" button.
pub async fn question_list(
    State(service): State<Arc<dyn Service>>,
    State(templates): State<Templates>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, AppError> {
    let params = Params::from_query(query.as_deref());
    let search = params.string("search", "").trim().to_string();
    let rules = params.list("rules");
    let mut last_rule_sort_order = params.int("lastRuleSortOrder", 0);
    let mut last_question_number = params.int("lastQuestionNumber", 0);

    let questions = service
        .list_questions(
            &rules,
            &search,
            last_rule_sort_order,
            last_question_number,
            PAGE_SIZE,
        )
        .await?;

    // Empty page keeps the incoming cursor.
    if let Some(last) = questions.last() {
        (last_rule_sort_order, last_question_number) = last.cursor();
    }
    let has_more = questions.len() as i64 == PAGE_SIZE;

    let items: Vec<QuestionListItem> = questions.into_iter().map(Into::into).collect();
    let load_more = LoadMoreParam {
        search,
        rules: rules.join(","),
        last_rule_sort_order,
        last_question_number,
        limit: PAGE_SIZE,
    };

    let template = if is_htmx(&headers) {
        "partials/question_rows.html"
    } else {
        "question_list.html"
    };

    templates.render(
        template,
        context! {
            questions => items,
            load_more_url => load_more.url(),
            load_more => load_more,
            has_more => has_more,
        },
    )
}

/// Renders one question by its id.
pub async fn question_by_id(
    State(service): State<Arc<dyn Service>>,
    State(templates): State<Templates>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let question = service.get_question_by_id(id).await?;
    render_question(&templates, question, None)
}

/// Renders a random question, optionally restricted by `rules`.
pub async fn random_question(
    State(service): State<Arc<dyn Service>>,
    State(templates): State<Templates>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, AppError> {
    let rules = Params::from_query(query.as_deref()).list("rules");

    let question = service.get_random_question(&rules).await?;
    render_question(&templates, question, Some(next_random_url(&rules)))
}

fn render_question(
    templates: &Templates,
    question: Question,
    next_url: Option<String>,
) -> Result<Html<String>, AppError> {
    templates.render(
        "question.html",
        context! {
            question => question,
            next_url => next_url,
        },
    )
}

/// Link to another random question under the same rule filter.
fn next_random_url(rules: &[String]) -> String {
    if rules.is_empty() {
        return "/questions/random".to_string();
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("rules", &rules.join(","))
        .finish();
    format!("/questions/random?{}", query)
}

/// Grades a submitted answer.
///
/// * Reads the repeatable form field `choices` (option labels).
/// * Marks each stored choice selected if its label was submitted.
/// * Renders per-choice correct/incorrect state and the overall verdict.
pub async fn submit_answer(
    State(service): State<Arc<dyn Service>>,
    State(templates): State<Templates>,
    Path(question_id): Path<i64>,
    headers: HeaderMap,
    body: String,
) -> Result<Html<String>, AppError> {
    let selected = Params::parse(&body).all("choices");

    let choices = service.get_choices_by_question_id(question_id).await?;
    if choices.is_empty() {
        return Err(AppError::NotFound(format!(
            "Question {} not found",
            question_id
        )));
    }

    let result = AnswerResult::new(question_id, choices, &selected);
    tracing::debug!(question_id, correct = result.is_correct, "Answer graded");

    let template = if is_htmx(&headers) {
        "partials/result.html"
    } else {
        "result.html"
    };

    templates.render(template, context! { result => result })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_url_keeps_filter() {
        assert_eq!(next_random_url(&[]), "/questions/random");
        assert_eq!(
            next_random_url(&["goal-area".into(), "throw-in".into()]),
            "/questions/random?rules=goal-area%2Cthrow-in"
        );
    }
}
