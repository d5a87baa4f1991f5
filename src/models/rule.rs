// src/models/rule.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'rule' table in the database.
/// A section of the rulebook, e.g. "goal-area" / "The Goal Area".
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Rule {
    /// Short rule code.
    pub id: String,

    pub name: String,

    /// Display position of the rule. Also the first key of the question list cursor.
    pub sort_order: i32,
}
