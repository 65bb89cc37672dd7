use serde::{Deserialize, Serialize};

/// Determines both the raw-answer shape a client may submit and the
/// comparison rule used during grading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Single,
    Multi,
    Identification,
    TrueFalse,
}

impl QuestionType {
    pub const ALL: [QuestionType; 4] = [
        QuestionType::Single,
        QuestionType::Multi,
        QuestionType::Identification,
        QuestionType::TrueFalse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Single => "single",
            QuestionType::Multi => "multi",
            QuestionType::Identification => "identification",
            QuestionType::TrueFalse => "true_false",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub question_type: QuestionType,
    /// Authoritative for `identification` and `true_false` questions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    /// Authoritative for `single` and `multi` questions.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Choice {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
}

impl Choice {
    pub fn new(id: &str, text: &str, is_correct: bool) -> Self {
        Choice {
            id: id.to_string(),
            text: text.to_string(),
            is_correct,
        }
    }
}

impl Question {
    pub fn single(id: &str, text: &str, choices: Vec<Choice>) -> Self {
        Question {
            id: id.to_string(),
            text: text.to_string(),
            question_type: QuestionType::Single,
            correct_answer: None,
            choices,
        }
    }

    pub fn multi(id: &str, text: &str, choices: Vec<Choice>) -> Self {
        Question {
            id: id.to_string(),
            text: text.to_string(),
            question_type: QuestionType::Multi,
            correct_answer: None,
            choices,
        }
    }

    pub fn identification(id: &str, text: &str, correct_answer: &str) -> Self {
        Question {
            id: id.to_string(),
            text: text.to_string(),
            question_type: QuestionType::Identification,
            correct_answer: Some(correct_answer.to_string()),
            choices: Vec::new(),
        }
    }

    pub fn true_false(id: &str, text: &str, correct_answer: &str) -> Self {
        Question {
            id: id.to_string(),
            text: text.to_string(),
            question_type: QuestionType::TrueFalse,
            correct_answer: Some(correct_answer.to_string()),
            choices: Vec::new(),
        }
    }

    pub fn correct_choices(&self) -> impl Iterator<Item = &Choice> {
        self.choices.iter().filter(|c| c.is_correct)
    }
}
