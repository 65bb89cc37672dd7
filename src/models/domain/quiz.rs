use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::question::Question;

/// A quiz owned by one classroom. Once responses exist the questions are
/// treated as immutable for grading purposes: edits never regrade.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub classroom_id: String,
    pub created_by_teacher_id: String,
    pub questions: Vec<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl Quiz {
    pub fn new(
        title: &str,
        classroom_id: &str,
        created_by_teacher_id: &str,
        questions: Vec<Question>,
    ) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: None,
            classroom_id: classroom_id.to_string(),
            created_by_teacher_id: created_by_teacher_id.to_string(),
            questions,
            due_date: None,
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    /// Every question counts toward `total_possible`, answered or not.
    pub fn total_possible(&self) -> i32 {
        self.questions.len() as i32
    }
}
