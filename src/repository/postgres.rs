// src/repository/postgres.rs

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use super::Repository;
use crate::{
    error::AppError,
    models::{
        feedback::Feedback,
        question::{Choice, Question},
        rule::Rule,
    },
};

/// Columns shared by every question query. Joined with its rule.
const QUESTION_COLUMNS: &str = r#"
    SELECT
        q.id,
        q.text,
        q.rule_question_number,
        q.question_number,
        r.id AS rule_id,
        r.name AS rule_name,
        r.sort_order AS rule_sort_order
    FROM question q
    JOIN rule r ON r.id = q.rule_id
"#;

/// Flat row of a question joined with its rule.
#[derive(FromRow)]
struct QuestionRow {
    id: i64,
    text: String,
    rule_question_number: String,
    question_number: i32,
    rule_id: String,
    rule_name: String,
    rule_sort_order: i32,
}

impl QuestionRow {
    fn into_question(self, choices: Vec<Choice>) -> Question {
        Question {
            id: self.id,
            text: self.text,
            rule: Rule {
                id: self.rule_id,
                name: self.rule_name,
                sort_order: self.rule_sort_order,
            },
            rule_question_number: self.rule_question_number,
            question_number: self.question_number,
            choices,
        }
    }
}

/// PostgreSQL-backed repository.
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Loads the choices of several questions in one query, grouped by question id.
    async fn choices_for(&self, question_ids: &[i64]) -> Result<HashMap<i64, Vec<Choice>>, AppError> {
        let choices = sqlx::query_as::<_, Choice>(
            r#"
            SELECT id, question_id, option, text, is_answer
            FROM choice
            WHERE question_id = ANY($1)
            ORDER BY question_id, option
            "#,
        )
        .bind(question_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<i64, Vec<Choice>> = HashMap::new();
        for choice in choices {
            grouped.entry(choice.question_id).or_default().push(choice);
        }
        Ok(grouped)
    }

    async fn with_choices(&self, row: QuestionRow) -> Result<Question, AppError> {
        let choices = self.get_choices_by_question_id(row.id).await?;
        Ok(row.into_question(choices))
    }
}

/// Escapes LIKE wildcards so the search term matches literally.
fn like_pattern(search: &str) -> Option<String> {
    if search.is_empty() {
        return None;
    }
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Some(format!("%{}%", escaped))
}

#[async_trait]
impl Repository for PgRepository {
    async fn get_random_question(&self, rules: &[String]) -> Result<Question, AppError> {
        let sql = format!(
            r#"{}
            WHERE (cardinality($1::TEXT[]) = 0 OR q.rule_id = ANY($1))
            ORDER BY RANDOM()
            LIMIT 1
            "#,
            QUESTION_COLUMNS
        );

        let row = sqlx::query_as::<_, QuestionRow>(&sql)
            .bind(rules)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("No question matches the selected rules".to_string()))?;

        self.with_choices(row).await
    }

    async fn get_question_by_id(&self, id: i64) -> Result<Question, AppError> {
        let sql = format!("{} WHERE q.id = $1", QUESTION_COLUMNS);

        let row = sqlx::query_as::<_, QuestionRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound(format!("Question {} not found", id)))?;

        self.with_choices(row).await
    }

    async fn get_choices_by_question_id(&self, question_id: i64) -> Result<Vec<Choice>, AppError> {
        let choices = sqlx::query_as::<_, Choice>(
            r#"
            SELECT id, question_id, option, text, is_answer
            FROM choice
            WHERE question_id = $1
            ORDER BY option
            "#,
        )
        .bind(question_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(choices)
    }

    async fn get_all_rules(&self) -> Result<Vec<Rule>, AppError> {
        let rules = sqlx::query_as::<_, Rule>(
            r#"
            SELECT id, name, sort_order
            FROM rule
            ORDER BY sort_order
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rules)
    }

    async fn get_all_questions(&self) -> Result<Vec<Question>, AppError> {
        let sql = format!("{} ORDER BY r.sort_order, q.question_number", QUESTION_COLUMNS);

        let rows = sqlx::query_as::<_, QuestionRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut choices = self.choices_for(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let c = choices.remove(&row.id).unwrap_or_default();
                row.into_question(c)
            })
            .collect())
    }

    async fn list_questions(
        &self,
        rules: &[String],
        search: &str,
        last_rule_sort_order: i32,
        last_question_number: i32,
        limit: i64,
    ) -> Result<Vec<Question>, AppError> {
        let search_pattern = like_pattern(search);

        // Row comparison keeps the page strictly after the cursor.
        let sql = format!(
            r#"{}
            WHERE (cardinality($1::TEXT[]) = 0 OR q.rule_id = ANY($1))
              AND ($2::TEXT IS NULL OR q.text ILIKE $2)
              AND (r.sort_order, q.question_number) > ($3, $4)
            ORDER BY r.sort_order, q.question_number
            LIMIT $5
            "#,
            QUESTION_COLUMNS
        );

        let rows = sqlx::query_as::<_, QuestionRow>(&sql)
            .bind(rules)
            .bind(search_pattern)
            .bind(last_rule_sort_order)
            .bind(last_question_number)
            .bind(limit.max(0))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| row.into_question(Vec::new()))
            .collect())
    }

    async fn submit_feedback(&self, feedback: &Feedback) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO feedback (name, email, topic, text)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&feedback.name)
        .bind(&feedback.email)
        .bind(&feedback.topic)
        .bind(&feedback.text)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
