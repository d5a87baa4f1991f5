// src/service.rs

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        feedback::Feedback,
        question::{Choice, Question},
        rule::Rule,
    },
    repository::Repository,
};

/// Operations the handlers depend on.
///
/// Mirrors [`Repository`] so business rules can be added here later
/// without touching handlers or storage.
#[async_trait]
pub trait Service: Send + Sync {
    async fn get_all_questions(&self) -> Result<Vec<Question>, AppError>;
    async fn get_all_rules(&self) -> Result<Vec<Rule>, AppError>;
    async fn get_question_by_id(&self, id: i64) -> Result<Question, AppError>;
    async fn get_random_question(&self, rules: &[String]) -> Result<Question, AppError>;
    async fn get_choices_by_question_id(&self, question_id: i64) -> Result<Vec<Choice>, AppError>;
    async fn list_questions(
        &self,
        rules: &[String],
        search: &str,
        last_rule_sort_order: i32,
        last_question_number: i32,
        limit: i64,
    ) -> Result<Vec<Question>, AppError>;
    async fn submit_feedback(&self, feedback: &Feedback) -> Result<(), AppError>;
}

/// Delegates every call to the repository unchanged.
#[derive(Clone)]
pub struct TrainerService {
    repository: Arc<dyn Repository>,
}

impl TrainerService {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl Service for TrainerService {
    async fn get_all_questions(&self) -> Result<Vec<Question>, AppError> {
        self.repository.get_all_questions().await
    }

    async fn get_all_rules(&self) -> Result<Vec<Rule>, AppError> {
        self.repository.get_all_rules().await
    }

    async fn get_question_by_id(&self, id: i64) -> Result<Question, AppError> {
        self.repository.get_question_by_id(id).await
    }

    async fn get_random_question(&self, rules: &[String]) -> Result<Question, AppError> {
        self.repository.get_random_question(rules).await
    }

    async fn get_choices_by_question_id(&self, question_id: i64) -> Result<Vec<Choice>, AppError> {
        self.repository.get_choices_by_question_id(question_id).await
    }

    async fn list_questions(
        &self,
        rules: &[String],
        search: &str,
        last_rule_sort_order: i32,
        last_question_number: i32,
        limit: i64,
    ) -> Result<Vec<Question>, AppError> {
        self.repository
            .list_questions(rules, search, last_rule_sort_order, last_question_number, limit)
            .await
    }

    async fn submit_feedback(&self, feedback: &Feedback) -> Result<(), AppError> {
        self.repository.submit_feedback(feedback).await
    }
}
