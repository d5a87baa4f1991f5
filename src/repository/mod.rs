//! Storage port for rules, questions, choices and feedback.
//!
//! Handlers never talk to a store directly; they go through
//! [`crate::service::Service`], which delegates here. Any engine that can
//! answer these queries can back the trainer.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        feedback::Feedback,
        question::{Choice, Question},
        rule::Rule,
    },
};

pub use memory::InMemoryRepository;
pub use postgres::PgRepository;

/// Storage operations of the trainer.
///
/// Each call is a single read (question lookups also load their choices)
/// or a single insert. Errors are returned unmodified, nothing is retried.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Picks one question uniformly at random, with its choices.
    ///
    /// A non-empty `rules` restricts the candidates to those rule ids.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no question is eligible
    async fn get_random_question(&self, rules: &[String]) -> Result<Question, AppError>;

    /// # Errors
    ///
    /// - `NotFound` if the id does not exist
    async fn get_question_by_id(&self, id: i64) -> Result<Question, AppError>;

    /// Choices of a question ordered by option label. Empty for unknown ids.
    async fn get_choices_by_question_id(&self, question_id: i64) -> Result<Vec<Choice>, AppError>;

    /// All rules ordered by sort order.
    async fn get_all_rules(&self) -> Result<Vec<Rule>, AppError>;

    /// All questions with their choices, in rule then question order.
    async fn get_all_questions(&self) -> Result<Vec<Question>, AppError>;

    /// Keyset page of questions strictly after
    /// `(last_rule_sort_order, last_question_number)`.
    ///
    /// `search` is a case-insensitive substring match on the question text
    /// and `rules` a rule id filter; both are ignored when empty. Rows come
    /// back without choices.
    async fn list_questions(
        &self,
        rules: &[String],
        search: &str,
        last_rule_sort_order: i32,
        last_question_number: i32,
        limit: i64,
    ) -> Result<Vec<Question>, AppError>;

    /// Stores one feedback submission.
    async fn submit_feedback(&self, feedback: &Feedback) -> Result<(), AppError>;
}
