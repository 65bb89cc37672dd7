use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStatus {
    Passed,
    Failed,
}

impl ScoreStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreStatus::Passed => "passed",
            ScoreStatus::Failed => "failed",
        }
    }
}

/// The immutable grading outcome of a single StudentResponse, one-to-one
/// with it and written in the same storage transaction.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizScore {
    pub id: String,
    pub student_id: String,
    pub quiz_id: String,
    pub classroom_id: String,
    pub response_id: String,
    pub total_score: i32,
    pub total_possible: i32,
    pub percentage_score: f64,
    pub status: ScoreStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl QuizScore {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        student_id: &str,
        quiz_id: &str,
        classroom_id: &str,
        response_id: &str,
        total_score: i32,
        total_possible: i32,
        percentage_score: f64,
        status: ScoreStatus,
    ) -> Self {
        QuizScore {
            id: Uuid::new_v4().to_string(),
            student_id: student_id.to_string(),
            quiz_id: quiz_id.to_string(),
            classroom_id: classroom_id.to_string(),
            response_id: response_id.to_string(),
            total_score,
            total_possible,
            percentage_score,
            status,
            created_at: Some(Utc::now()),
        }
    }

    pub fn score_display(&self) -> String {
        format!(
            "{}/{} ({:.1}%)",
            self.total_score, self.total_possible, self.percentage_score
        )
    }
}
