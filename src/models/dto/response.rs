use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{QuizScore, ScoreStatus, Student};

#[derive(Debug, Clone, Serialize)]
pub struct ScoreSummary {
    pub total_score: i32,
    pub total_possible: i32,
    pub percentage_score: f64,
    pub status: ScoreStatus,
}

impl From<&QuizScore> for ScoreSummary {
    fn from(score: &QuizScore) -> Self {
        ScoreSummary {
            total_score: score.total_score,
            total_possible: score.total_possible,
            percentage_score: score.percentage_score,
            status: score.status,
        }
    }
}

/// Success payload of a quiz submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub response_id: String,
    pub score_summary: ScoreSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct HasSubmittedResponse {
    pub has_submitted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassroomPassFail {
    pub classroom_name: String,
    pub passed: i64,
    pub failed: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizPassFailBreakdown {
    pub quiz_id: String,
    pub quiz_title: String,
    pub total_passed: i64,
    pub total_failed: i64,
    pub classroom_breakdown: Vec<ClassroomPassFail>,
}

/// Chart-ready question counts per type.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionTypeDistribution {
    pub labels: Vec<String>,
    pub counts: Vec<i64>,
}

/// One row of the teacher-facing score listing.
#[derive(Debug, Clone, Serialize)]
pub struct QuizScoreRow {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub grade_level: String,
    pub quiz_id: String,
    pub quiz_title: String,
    pub total_score: i32,
    pub total_possible: i32,
    pub percentage_score: f64,
    pub status: ScoreStatus,
    pub score_display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl QuizScoreRow {
    pub fn from_score(score: &QuizScore, student: Option<&Student>, quiz_title: &str) -> Self {
        QuizScoreRow {
            id: score.id.clone(),
            student_id: score.student_id.clone(),
            student_name: student
                .map(|s| s.full_name())
                .unwrap_or_else(|| "Unknown Student".to_string()),
            grade_level: student.map(|s| s.grade_level.clone()).unwrap_or_default(),
            quiz_id: score.quiz_id.clone(),
            quiz_title: quiz_title.to_string(),
            total_score: score.total_score,
            total_possible: score.total_possible,
            percentage_score: score.percentage_score,
            status: score.status,
            score_display: score.score_display(),
            created_at: score.created_at,
        }
    }
}
