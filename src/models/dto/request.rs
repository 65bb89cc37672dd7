use std::collections::HashMap;

use serde::Deserialize;
use validator::Validate;

use crate::models::domain::RawAnswer;

/// Body of `POST /api/quizzes/{quiz_id}/responses`. The map is keyed by
/// question id; values are the loosely-typed raw answer shapes.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitQuizResponseRequest {
    #[validate(length(min = 1, max = 100))]
    pub student_id: String,

    #[validate(length(min = 1, max = 100))]
    pub classroom_id: String,

    pub responses: HashMap<String, RawAnswer>,
}

/// Optional scoping for the question-type performance view. All fields
/// absent means the whole dataset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsQuery {
    pub classroom_id: Option<String>,
    pub quiz_id: Option<String>,
    pub teacher_id: Option<String>,
}

/// Scope for the pass/fail breakdown: exactly one of quiz or teacher.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PassFailQuery {
    pub quiz_id: Option<String>,
    pub teacher_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoreListQuery {
    pub quiz_id: Option<String>,
}
