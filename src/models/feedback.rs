// src/models/feedback.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A feedback submission. Stored in the 'feedback' table and never read back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub name: String,
    pub email: String,
    pub topic: String,
    pub text: String,
}

/// Form body posted by the feedback page.
/// Every field may be missing or empty; only upper bounds are enforced.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct FeedbackForm {
    #[serde(rename = "Name", default)]
    #[validate(length(max = 200, message = "Name must be at most 200 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 320, message = "Email must be at most 320 characters"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 200, message = "Topic must be at most 200 characters"))]
    pub topic: String,

    #[serde(rename = "feedback", default)]
    #[validate(length(max = 10000, message = "Feedback must be at most 10000 characters"))]
    pub text: String,
}

impl From<FeedbackForm> for Feedback {
    fn from(form: FeedbackForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            topic: form.topic.trim().to_string(),
            text: form.text.trim().to_string(),
        }
    }
}
