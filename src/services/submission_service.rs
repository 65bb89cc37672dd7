use std::collections::HashMap;
use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    grading::{self, evaluator},
    models::{
        domain::{Question, QuestionType, Quiz, QuizScore, RawAnswer, StudentResponse},
        dto::{
            request::SubmitQuizResponseRequest,
            response::{HasSubmittedResponse, ScoreSummary, SubmissionReceipt},
        },
    },
    repositories::{QuizRepository, RosterRepository, SubmissionRepository},
};

/// The response ingestion pipeline: validate a submission against its
/// quiz, grade it question by question, and persist the response together
/// with exactly one score record in a single atomic storage operation.
pub struct SubmissionService {
    quiz_repository: Arc<dyn QuizRepository>,
    submission_repository: Arc<dyn SubmissionRepository>,
    roster_repository: Arc<dyn RosterRepository>,
}

impl SubmissionService {
    pub fn new(
        quiz_repository: Arc<dyn QuizRepository>,
        submission_repository: Arc<dyn SubmissionRepository>,
        roster_repository: Arc<dyn RosterRepository>,
    ) -> Self {
        Self {
            quiz_repository,
            submission_repository,
            roster_repository,
        }
    }

    pub async fn submit(
        &self,
        quiz_id: &str,
        request: SubmitQuizResponseRequest,
    ) -> AppResult<SubmissionReceipt> {
        request.validate()?;

        if self
            .roster_repository
            .find_student(&request.student_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotAStudent(request.student_id.clone()));
        }

        let quiz = self
            .quiz_repository
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        if quiz.classroom_id != request.classroom_id {
            return Err(AppError::ValidationError(format!(
                "Quiz '{}' does not belong to classroom '{}'",
                quiz.id, request.classroom_id
            )));
        }

        if self
            .submission_repository
            .has_submitted(&request.student_id, &quiz.id)
            .await?
        {
            return Err(AppError::AlreadyExists(format!(
                "Student '{}' has already submitted quiz '{}'",
                request.student_id, quiz.id
            )));
        }

        // Reject the whole submission before any write; grading itself
        // never fails past this point.
        validate_answer_shapes(&quiz, &request.responses)?;

        let (total_score, total_possible) = grade(&quiz, &request.responses);
        let (percentage, status) = grading::aggregate(
            total_score,
            total_possible,
            grading::DEFAULT_PASSING_THRESHOLD,
        );

        let response = StudentResponse::new(
            &quiz.id,
            &request.classroom_id,
            &request.student_id,
            request.responses,
        );
        let score = QuizScore::new(
            &response.student_id,
            &quiz.id,
            &request.classroom_id,
            &response.id,
            total_score,
            total_possible,
            percentage,
            status,
        );

        let (response, score) = self
            .submission_repository
            .insert_graded(response, score)
            .await?;

        log::info!(
            "Graded quiz '{}' for student '{}': {}",
            quiz.id,
            score.student_id,
            score.score_display()
        );

        Ok(SubmissionReceipt {
            response_id: response.id,
            score_summary: ScoreSummary::from(&score),
        })
    }

    pub async fn has_submitted(
        &self,
        student_id: &str,
        quiz_id: &str,
    ) -> AppResult<HasSubmittedResponse> {
        let quiz = self
            .quiz_repository
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        let has_submitted = self
            .submission_repository
            .has_submitted(student_id, &quiz.id)
            .await?;

        Ok(HasSubmittedResponse { has_submitted })
    }
}

/// Count correct answers across the quiz's questions. Questions absent
/// from the submission count toward the total but never toward the score.
fn grade(quiz: &Quiz, answers: &HashMap<String, RawAnswer>) -> (i32, i32) {
    let total_possible = quiz.total_possible();
    let total_score = quiz
        .questions
        .iter()
        .filter(|question| {
            answers
                .get(&question.id)
                .map_or(false, |raw| evaluator::grade_answer(question, raw))
        })
        .count() as i32;
    (total_score, total_possible)
}

fn validate_answer_shapes(quiz: &Quiz, answers: &HashMap<String, RawAnswer>) -> AppResult<()> {
    for (question_id, answer) in answers {
        let question = quiz
            .question(question_id)
            .ok_or_else(|| AppError::UnknownQuestion(question_id.clone()))?;
        validate_answer_shape(question, answer)?;
    }
    Ok(())
}

/// Structural validity of a raw answer for its question type. A mismatch
/// is a caller mistake, distinct from a grading outcome.
fn validate_answer_shape(question: &Question, answer: &RawAnswer) -> AppResult<()> {
    let malformed = |detail: &str| AppError::MalformedAnswer {
        question_id: question.id.clone(),
        detail: detail.to_string(),
    };

    match question.question_type {
        QuestionType::Single => match answer {
            RawAnswer::Int(_) | RawAnswer::Text(_) => Ok(()),
            _ => Err(malformed("single choice answer must be a single value")),
        },
        QuestionType::Multi => match answer {
            RawAnswer::List(items) => {
                if items.iter().all(RawAnswer::is_scalar) {
                    Ok(())
                } else {
                    Err(malformed("multiple choice entries must be single values"))
                }
            }
            _ => Err(malformed("multiple choice answer must be a list")),
        },
        QuestionType::Identification => match answer {
            RawAnswer::Text(_) => Ok(()),
            _ => Err(malformed("identification answer must be text")),
        },
        QuestionType::TrueFalse => match answer {
            RawAnswer::Bool(_) | RawAnswer::Text(_) | RawAnswer::Int(_) => Ok(()),
            _ => Err(malformed("true/false answer must be a boolean or text value")),
        },
    }
}
