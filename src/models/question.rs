// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::rule::Rule;

/// A quiz question together with its rule and answer choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,

    pub text: String,

    pub rule: Rule,

    /// Label printed in the rulebook, e.g. "8:3".
    pub rule_question_number: String,

    /// Ordinal within the rule. Second key of the question list cursor.
    pub question_number: i32,

    /// Ordered by option label. Empty for list rows.
    pub choices: Vec<Choice>,
}

impl Question {
    /// Option labels of the correct choices, in option order.
    pub fn correct_options(&self) -> Vec<String> {
        self.choices
            .iter()
            .filter(|c| c.is_answer)
            .map(|c| c.option.clone())
            .collect()
    }

    /// Keyset position of this question in the question list.
    pub fn cursor(&self) -> (i32, i32) {
        (self.rule.sort_order, self.question_number)
    }
}

/// Represents the 'choice' table in the database.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Choice {
    pub id: i64,
    pub question_id: i64,

    /// Option label, e.g. "A".
    pub option: String,

    pub text: String,

    pub is_answer: bool,

    /// UI helper: whether the current user picked this choice.
    /// Never stored, filled in when rendering a submitted answer.
    #[sqlx(skip)]
    #[serde(default)]
    pub is_selected: bool,
}

impl Choice {
    /// A choice is answered correctly when it was selected iff it is an answer.
    pub fn is_correct(&self) -> bool {
        self.is_selected == self.is_answer
    }
}

/// Flags every choice whose option label appears in `selected`.
pub fn mark_selected(choices: &mut [Choice], selected: &[String]) {
    for choice in choices.iter_mut() {
        choice.is_selected = selected.iter().any(|s| s == &choice.option);
    }
}

/// Row of the home page listing.
#[derive(Debug, Serialize)]
pub struct QuestionSummary {
    /// 1-based position in the listing.
    pub index: usize,
    pub correct_choices: String,
    pub rule_question_number: String,
    pub text: String,
    pub choices: Vec<Choice>,
    pub question_number: i32,
    pub rule_name: String,
}

impl QuestionSummary {
    pub fn from_questions(questions: Vec<Question>) -> Vec<Self> {
        questions
            .into_iter()
            .enumerate()
            .map(|(i, q)| Self {
                index: i + 1,
                correct_choices: q.correct_options().join(","),
                rule_question_number: q.rule_question_number,
                text: q.text,
                choices: q.choices,
                question_number: q.question_number,
                rule_name: q.rule.name,
            })
            .collect()
    }
}

/// Row of the paginated question list.
#[derive(Debug, Serialize)]
pub struct QuestionListItem {
    pub id: i64,
    pub rule_id: String,
    pub rule_name: String,
    pub rule_question_number: String,
    pub text: String,
}

impl From<Question> for QuestionListItem {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            rule_id: q.rule.id,
            rule_name: q.rule.name,
            rule_question_number: q.rule_question_number,
            text: q.text,
        }
    }
}

/// Parameters the "load more" button sends back to fetch the next page.
#[derive(Debug, Serialize, PartialEq)]
pub struct LoadMoreParam {
    pub search: String,
    pub rules: String,
    pub last_rule_sort_order: i32,
    pub last_question_number: i32,
    pub limit: i64,
}

impl LoadMoreParam {
    /// Query URL of the next page.
    pub fn url(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        if !self.search.is_empty() {
            query.append_pair("search", &self.search);
        }
        if !self.rules.is_empty() {
            query.append_pair("rules", &self.rules);
        }
        query
            .append_pair("lastRuleSortOrder", &self.last_rule_sort_order.to_string())
            .append_pair("lastQuestionNumber", &self.last_question_number.to_string());
        format!("/questions?{}", query.finish())
    }
}

/// Outcome of a submitted answer.
#[derive(Debug, Serialize)]
pub struct AnswerResult {
    pub question_id: i64,
    pub choices: Vec<Choice>,
    /// True when the selected set equals the answer set.
    pub is_correct: bool,
}

impl AnswerResult {
    pub fn new(question_id: i64, mut choices: Vec<Choice>, selected: &[String]) -> Self {
        mark_selected(&mut choices, selected);
        let is_correct = !choices.is_empty() && choices.iter().all(Choice::is_correct);
        Self {
            question_id,
            choices,
            is_correct,
        }
    }
}
