use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The loosely-typed answer shapes a client may submit, exactly as they
/// arrive on the wire. Normalization into comparable form happens in
/// `grading::normalizer`, never here.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawAnswer {
    Bool(bool),
    Int(i64),
    Text(String),
    List(Vec<RawAnswer>),
}

impl RawAnswer {
    pub fn is_scalar(&self) -> bool {
        !matches!(self, RawAnswer::List(_))
    }

    /// String form of a scalar answer; `None` for lists.
    pub fn as_scalar_string(&self) -> Option<String> {
        match self {
            RawAnswer::Bool(value) => Some(value.to_string()),
            RawAnswer::Int(value) => Some(value.to_string()),
            RawAnswer::Text(value) => Some(value.clone()),
            RawAnswer::List(_) => None,
        }
    }
}

impl From<&str> for RawAnswer {
    fn from(value: &str) -> Self {
        RawAnswer::Text(value.to_string())
    }
}

impl From<i64> for RawAnswer {
    fn from(value: i64) -> Self {
        RawAnswer::Int(value)
    }
}

impl From<bool> for RawAnswer {
    fn from(value: bool) -> Self {
        RawAnswer::Bool(value)
    }
}

/// One student's submitted answers for one quiz, keyed by question id.
/// Immutable after creation; its score record is written in the same
/// storage transaction.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct StudentResponse {
    pub id: String,
    pub quiz_id: String,
    pub classroom_id: String,
    pub student_id: String,
    pub answers: HashMap<String, RawAnswer>,
    pub submitted_at: DateTime<Utc>,
}

impl StudentResponse {
    pub fn new(
        quiz_id: &str,
        classroom_id: &str,
        student_id: &str,
        answers: HashMap<String, RawAnswer>,
    ) -> Self {
        StudentResponse {
            id: Uuid::new_v4().to_string(),
            quiz_id: quiz_id.to_string(),
            classroom_id: classroom_id.to_string(),
            student_id: student_id.to_string(),
            answers,
            submitted_at: Utc::now(),
        }
    }

    pub fn answer(&self, question_id: &str) -> Option<&RawAnswer> {
        self.answers.get(question_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_answer_deserializes_each_wire_shape() {
        let parsed: RawAnswer = serde_json::from_str("true").unwrap();
        assert_eq!(parsed, RawAnswer::Bool(true));

        let parsed: RawAnswer = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, RawAnswer::Int(7));

        let parsed: RawAnswer = serde_json::from_str("\"paris\"").unwrap();
        assert_eq!(parsed, RawAnswer::Text("paris".to_string()));

        let parsed: RawAnswer = serde_json::from_str("[5, 3]").unwrap();
        assert_eq!(
            parsed,
            RawAnswer::List(vec![RawAnswer::Int(5), RawAnswer::Int(3)])
        );
    }

    #[test]
    fn raw_answer_scalar_string_forms() {
        assert_eq!(
            RawAnswer::Bool(true).as_scalar_string(),
            Some("true".to_string())
        );
        assert_eq!(RawAnswer::Int(7).as_scalar_string(), Some("7".to_string()));
        assert_eq!(
            RawAnswer::from("yes").as_scalar_string(),
            Some("yes".to_string())
        );
        assert_eq!(RawAnswer::List(vec![]).as_scalar_string(), None);
    }

    #[test]
    fn student_response_round_trip_serialization() {
        let mut answers = HashMap::new();
        answers.insert("q-1".to_string(), RawAnswer::Int(7));
        answers.insert(
            "q-2".to_string(),
            RawAnswer::List(vec![RawAnswer::Int(3), RawAnswer::Int(5)]),
        );

        let response = StudentResponse::new("quiz-1", "classroom-1", "student-1", answers);

        let json = serde_json::to_string(&response).expect("response should serialize");
        let parsed: StudentResponse =
            serde_json::from_str(&json).expect("response should deserialize");

        assert_eq!(parsed, response);
        assert_eq!(parsed.answer("q-1"), Some(&RawAnswer::Int(7)));
        assert_eq!(parsed.answer("q-9"), None);
    }
}
