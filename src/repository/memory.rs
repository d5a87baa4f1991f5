//! In-memory repository.
//!
//! Holds a fixed set of rules and questions and records feedback in a
//! `Mutex`-guarded log. Used by the test suites and for running the trainer
//! without a database.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::seq::SliceRandom;

use super::Repository;
use crate::{
    error::AppError,
    models::{
        feedback::Feedback,
        question::{Choice, Question},
        rule::Rule,
    },
};

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    rules: Vec<Rule>,
    questions: Vec<Question>,
    feedback: Mutex<Vec<Feedback>>,
}

impl InMemoryRepository {
    /// Builds a repository from rules and questions.
    ///
    /// Rules are kept in sort order, questions in `(rule sort order,
    /// question number)` order and choices in option order, matching what
    /// the SQL queries return. Rule sort orders must be unique, as the
    /// schema enforces, so `(sort order, question number)` is a key.
    pub fn new(mut rules: Vec<Rule>, mut questions: Vec<Question>) -> Self {
        rules.sort_by_key(|r| r.sort_order);
        questions.sort_by_key(Question::cursor);
        for q in &mut questions {
            q.choices.sort_by(|a, b| a.option.cmp(&b.option));
        }
        Self {
            rules,
            questions,
            feedback: Mutex::new(Vec::new()),
        }
    }

    /// Returns all stored feedback.
    pub fn feedback(&self) -> Vec<Feedback> {
        self.feedback
            .lock()
            .map(|f| f.clone())
            .unwrap_or_default()
    }

    fn matches_rules(question: &Question, rules: &[String]) -> bool {
        rules.is_empty() || rules.iter().any(|r| r == &question.rule.id)
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn get_random_question(&self, rules: &[String]) -> Result<Question, AppError> {
        let eligible: Vec<&Question> = self
            .questions
            .iter()
            .filter(|q| Self::matches_rules(q, rules))
            .collect();

        eligible
            .choose(&mut rand::thread_rng())
            .map(|q| (*q).clone())
            .ok_or(AppError::NotFound("No question matches the selected rules".to_string()))
    }

    async fn get_question_by_id(&self, id: i64) -> Result<Question, AppError> {
        self.questions
            .iter()
            .find(|q| q.id == id)
            .cloned()
            .ok_or(AppError::NotFound(format!("Question {} not found", id)))
    }

    async fn get_choices_by_question_id(&self, question_id: i64) -> Result<Vec<Choice>, AppError> {
        Ok(self
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .map(|q| q.choices.clone())
            .unwrap_or_default())
    }

    async fn get_all_rules(&self) -> Result<Vec<Rule>, AppError> {
        Ok(self.rules.clone())
    }

    async fn get_all_questions(&self) -> Result<Vec<Question>, AppError> {
        Ok(self.questions.clone())
    }

    async fn list_questions(
        &self,
        rules: &[String],
        search: &str,
        last_rule_sort_order: i32,
        last_question_number: i32,
        limit: i64,
    ) -> Result<Vec<Question>, AppError> {
        let needle = search.to_lowercase();
        let cursor = (last_rule_sort_order, last_question_number);

        Ok(self
            .questions
            .iter()
            .filter(|q| q.cursor() > cursor)
            .filter(|q| Self::matches_rules(q, rules))
            .filter(|q| needle.is_empty() || q.text.to_lowercase().contains(&needle))
            .take(usize::try_from(limit).unwrap_or(0))
            .map(|q| Question {
                choices: Vec::new(),
                ..q.clone()
            })
            .collect())
    }

    async fn submit_feedback(&self, feedback: &Feedback) -> Result<(), AppError> {
        self.feedback
            .lock()
            .map_err(|e| AppError::InternalServerError(e.to_string()))?
            .push(feedback.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rule(id: &str, sort_order: i32) -> Rule {
        Rule {
            id: id.to_string(),
            name: format!("Rule {}", id),
            sort_order,
        }
    }

    fn question(id: i64, rule: &Rule, number: i32, text: &str) -> Question {
        let choices = ["B", "A"]
            .iter()
            .enumerate()
            .map(|(i, opt)| Choice {
                id: id * 10 + i as i64,
                question_id: id,
                option: opt.to_string(),
                text: format!("Option {}", opt),
                is_answer: *opt == "A",
                is_selected: false,
            })
            .collect();
        Question {
            id,
            text: text.to_string(),
            rule: rule.clone(),
            rule_question_number: format!("{}:{}", rule.sort_order, number),
            question_number: number,
            choices,
        }
    }

    fn fixture() -> InMemoryRepository {
        let goal = rule("goal-area", 6);
        let throw = rule("throw-in", 11);
        let court = rule("playing-court", 1);
        InMemoryRepository::new(
            vec![goal.clone(), throw.clone(), court.clone()],
            vec![
                question(1, &goal, 2, "May the goalkeeper leave the goal area?"),
                question(2, &throw, 1, "Where is the throw-in taken?"),
                question(3, &goal, 1, "Who may enter the Goal Area?"),
                question(4, &court, 1, "How long is the court?"),
            ],
        )
    }

    #[tokio::test]
    async fn rules_come_back_in_sort_order() {
        let rules = fixture().get_all_rules().await.unwrap();
        let ids: Vec<_> = rules.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["playing-court", "goal-area", "throw-in"]);
    }

    #[tokio::test]
    async fn choices_are_ordered_by_option() {
        let choices = fixture().get_choices_by_question_id(1).await.unwrap();
        let options: Vec<_> = choices.iter().map(|c| c.option.as_str()).collect();
        assert_eq!(options, ["A", "B"]);
    }

    #[tokio::test]
    async fn unknown_question_has_no_choices() {
        assert!(fixture().get_choices_by_question_id(99).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_question_is_not_found() {
        let err = fixture().get_question_by_id(99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn random_question_respects_filter() {
        let repo = fixture();
        let filter = vec!["throw-in".to_string()];
        for _ in 0..10 {
            let q = repo.get_random_question(&filter).await.unwrap();
            assert_eq!(q.id, 2);
            assert_eq!(q.choices.len(), 2);
        }
    }

    #[tokio::test]
    async fn random_question_with_unknown_rule_is_not_found() {
        let err = fixture()
            .get_random_question(&["no-such-rule".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let page = fixture()
            .list_questions(&[], "GOAL AREA", 0, 0, 10)
            .await
            .unwrap();
        let ids: Vec<_> = page.iter().map(|q| q.id).collect();
        assert_eq!(ids, [3, 1]);
        assert!(page.iter().all(|q| q.choices.is_empty()));
    }

    #[tokio::test]
    async fn cursor_past_the_end_yields_empty_page() {
        let page = fixture()
            .list_questions(&[], "", 11, 1, 10)
            .await
            .unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn single_row_pages_cross_rule_boundaries() {
        let repo = fixture();
        let mut cursor = (0, 0);
        let mut ids = Vec::new();
        loop {
            let page = repo
                .list_questions(&[], "", cursor.0, cursor.1, 1)
                .await
                .unwrap();
            let Some(last) = page.last() else { break };
            cursor = last.cursor();
            ids.extend(page.iter().map(|q| q.id));
        }
        // (1,1) then (6,1), (6,2) then (11,1).
        assert_eq!(ids, [4, 3, 1, 2]);
    }

    #[tokio::test]
    async fn rule_filter_applies_to_pages() {
        let page = fixture()
            .list_questions(&["goal-area".to_string()], "", 6, 1, 10)
            .await
            .unwrap();
        let ids: Vec<_> = page.iter().map(|q| q.id).collect();
        assert_eq!(ids, [1]);
    }

    #[tokio::test]
    async fn feedback_is_recorded() {
        let repo = fixture();
        repo.submit_feedback(&Feedback::default()).await.unwrap();
        assert_eq!(repo.feedback().len(), 1);
    }

    fn arb_repository() -> impl Strategy<Value = InMemoryRepository> {
        // Unique (rule, number) pairs, like the database constraint.
        proptest::collection::btree_set((0..4i32, 0..8i32), 0..24).prop_map(|keys| {
            let rules: Vec<Rule> = (0..4).map(|i| rule(&format!("r{}", i), i)).collect();
            let questions = keys
                .into_iter()
                .enumerate()
                .map(|(i, (r, n))| question(i as i64 + 1, &rules[r as usize], n, "text"))
                .collect();
            InMemoryRepository::new(rules, questions)
        })
    }

    proptest! {
        #[test]
        fn pages_are_bounded_ordered_and_stable(
            repo in arb_repository(),
            picks in proptest::collection::vec(0..5i32, 0..3),
            last_rule in -1..5i32,
            last_number in -1..9i32,
            limit in 0..12i64,
        ) {
            let filter: Vec<String> = picks.iter().map(|i| format!("r{}", i)).collect();
            let rt = tokio::runtime::Runtime::new().unwrap();
            let (first, second) = rt.block_on(async {
                (
                    repo.list_questions(&filter, "", last_rule, last_number, limit).await.unwrap(),
                    repo.list_questions(&filter, "", last_rule, last_number, limit).await.unwrap(),
                )
            });

            prop_assert!((first.len() as i64) <= limit);
            prop_assert!(first.iter().all(|q| q.cursor() > (last_rule, last_number)));
            prop_assert!(first.iter().all(|q| filter.is_empty() || filter.contains(&q.rule.id)));
            prop_assert!(first.windows(2).all(|w| w[0].cursor() < w[1].cursor()));
            prop_assert_eq!(first, second);
        }

        #[test]
        fn walking_pages_visits_every_matching_question_once(
            repo in arb_repository(),
            picks in proptest::collection::vec(0..5i32, 0..3),
            limit in 1..5i64,
        ) {
            let filter: Vec<String> = picks.iter().map(|i| format!("r{}", i)).collect();
            let expected: Vec<i64> = repo
                .questions
                .iter()
                .filter(|q| filter.is_empty() || filter.contains(&q.rule.id))
                .map(|q| q.id)
                .collect();

            let rt = tokio::runtime::Runtime::new().unwrap();
            let walked = rt.block_on(async {
                let mut cursor = (i32::MIN, i32::MIN);
                let mut ids = Vec::new();
                loop {
                    let page = repo
                        .list_questions(&filter, "", cursor.0, cursor.1, limit)
                        .await
                        .unwrap();
                    let Some(last) = page.last() else { break };
                    cursor = last.cursor();
                    ids.extend(page.iter().map(|q| q.id));
                }
                ids
            });

            prop_assert_eq!(walked, expected);
        }

        #[test]
        fn random_question_belongs_to_filter(
            repo in arb_repository(),
            picks in proptest::collection::vec(0..5i32, 0..3),
        ) {
            let filter: Vec<String> = picks.iter().map(|i| format!("r{}", i)).collect();
            let rt = tokio::runtime::Runtime::new().unwrap();
            let result = rt.block_on(repo.get_random_question(&filter));
            let any_eligible = repo
                .questions
                .iter()
                .any(|q| filter.is_empty() || filter.contains(&q.rule.id));

            match result {
                Ok(q) => prop_assert!(filter.is_empty() || filter.contains(&q.rule.id)),
                Err(AppError::NotFound(_)) => prop_assert!(!any_eligible),
                Err(e) => prop_assert!(false, "unexpected error: {}", e),
            }
        }
    }
}
