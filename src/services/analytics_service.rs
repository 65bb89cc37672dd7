use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    grading::evaluator,
    models::{
        domain::{ScoreStatus, Student},
        dto::{
            request::AnalyticsQuery,
            response::{
                ClassroomPassFail, QuestionTypeDistribution, QuizPassFailBreakdown, QuizScoreRow,
            },
        },
    },
    repositories::{QuizRepository, ResponseFilter, RosterRepository, SubmissionRepository},
};

/// Read-path reporting over stored responses and scores. Correctness per
/// question type is recomputed from the raw answers through the same
/// normalizer and evaluator the ingestion pipeline uses, so the two paths
/// cannot drift. The pass/fail breakdown deliberately trusts the persisted
/// QuizScore rows instead: it reflects whatever rules were active at
/// submission time, which can go stale if grading rules change afterwards.
pub struct AnalyticsService {
    quiz_repository: Arc<dyn QuizRepository>,
    submission_repository: Arc<dyn SubmissionRepository>,
    roster_repository: Arc<dyn RosterRepository>,
}

impl AnalyticsService {
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

    /// Percentage of correct answers per question type across the scoped
    /// response set, one decimal place, only for types with at least one
    /// attempt.
    pub async fn question_type_performance(
        &self,
        query: &AnalyticsQuery,
    ) -> AppResult<BTreeMap<String, f64>> {
        let quiz_ids = self.scope_quiz_ids(query).await?;
        let filter = ResponseFilter {
            classroom_id: query.classroom_id.clone(),
            quiz_ids,
        };
        let responses = self.submission_repository.find_responses(filter).await?;

        let mut ids: Vec<String> = responses.iter().map(|r| r.quiz_id.clone()).collect();
        ids.sort();
        ids.dedup();
        let quizzes = self.quiz_repository.find_by_ids(&ids).await?;
        let quiz_map: HashMap<&str, _> = quizzes.iter().map(|q| (q.id.as_str(), q)).collect();

        let mut tallies: BTreeMap<&'static str, (i64, i64)> = BTreeMap::new();
        for response in &responses {
            let Some(quiz) = quiz_map.get(response.quiz_id.as_str()) else {
                continue;
            };
            for (question_id, raw) in &response.answers {
                // Answers keyed by a question that no longer exists on the
                // quiz are skipped, matching the ingestion-time contract.
                let Some(question) = quiz.question(question_id) else {
                    continue;
                };
                let tally = tallies
                    .entry(question.question_type.as_str())
                    .or_insert((0, 0));
                tally.1 += 1;
                if evaluator::grade_answer(question, raw) {
                    tally.0 += 1;
                }
            }
        }

        let mut performance = BTreeMap::new();
        for (type_name, (correct, total)) in tallies {
            if total > 0 {
                let percentage = correct as f64 / total as f64 * 100.0;
                performance.insert(type_name.to_string(), (percentage * 10.0).round() / 10.0);
            }
        }
        Ok(performance)
    }

    /// Pass/fail counts per quiz, grouped by classroom. Scoped to one quiz
    /// or to all quizzes created by one teacher, newest first.
    pub async fn quiz_pass_fail_breakdown(
        &self,
        quiz_id: Option<&str>,
        teacher_id: Option<&str>,
    ) -> AppResult<Vec<QuizPassFailBreakdown>> {
        let quizzes = match (quiz_id, teacher_id) {
            (Some(quiz_id), _) => {
                let quiz = self
                    .quiz_repository
                    .find_by_id(quiz_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id))
                    })?;
                vec![quiz]
            }
            (None, Some(teacher_id)) => self.quiz_repository.find_by_teacher(teacher_id).await?,
            (None, None) => {
                return Err(AppError::ValidationError(
                    "Either quiz_id or teacher_id is required".to_string(),
                ))
            }
        };

        let mut breakdowns = Vec::with_capacity(quizzes.len());
        for quiz in &quizzes {
            let scores = self
                .submission_repository
                .find_scores_by_quiz(&quiz.id)
                .await?;

            let total_passed = scores
                .iter()
                .filter(|s| s.status == ScoreStatus::Passed)
                .count() as i64;
            let total_failed = scores.len() as i64 - total_passed;

            let mut per_classroom: BTreeMap<String, (i64, i64)> = BTreeMap::new();
            for score in &scores {
                let tally = per_classroom
                    .entry(score.classroom_id.clone())
                    .or_insert((0, 0));
                match score.status {
                    ScoreStatus::Passed => tally.0 += 1,
                    ScoreStatus::Failed => tally.1 += 1,
                }
            }

            let classroom_ids: Vec<String> = per_classroom.keys().cloned().collect();
            let classrooms = self.roster_repository.find_classrooms(&classroom_ids).await?;
            let names: HashMap<&str, String> = classrooms
                .iter()
                .map(|c| (c.id.as_str(), c.display_name()))
                .collect();

            let classroom_breakdown = per_classroom
                .iter()
                .map(|(classroom_id, (passed, failed))| ClassroomPassFail {
                    classroom_name: names
                        .get(classroom_id.as_str())
                        .cloned()
                        .unwrap_or_else(|| classroom_id.clone()),
                    passed: *passed,
                    failed: *failed,
                })
                .collect();

            breakdowns.push(QuizPassFailBreakdown {
                quiz_id: quiz.id.clone(),
                quiz_title: quiz.title.clone(),
                total_passed,
                total_failed,
                classroom_breakdown,
            });
        }
        Ok(breakdowns)
    }

    /// Question counts per type across all quizzes, chart-ready.
    pub async fn question_type_distribution(&self) -> AppResult<QuestionTypeDistribution> {
        let quizzes = self.quiz_repository.find_all().await?;

        let mut counts: BTreeMap<&'static str, i64> = BTreeMap::new();
        for quiz in &quizzes {
            for question in &quiz.questions {
                *counts.entry(question.question_type.as_str()).or_insert(0) += 1;
            }
        }

        Ok(QuestionTypeDistribution {
            labels: counts.keys().map(|k| k.to_string()).collect(),
            counts: counts.values().copied().collect(),
        })
    }

    /// Teacher-facing score listing for one classroom, optionally one
    /// quiz, newest first.
    pub async fn classroom_scores(
        &self,
        classroom_id: &str,
        quiz_id: Option<&str>,
    ) -> AppResult<Vec<QuizScoreRow>> {
        let scores = self
            .submission_repository
            .find_scores_by_classroom(classroom_id, quiz_id)
            .await?;

        let mut quiz_ids: Vec<String> = scores.iter().map(|s| s.quiz_id.clone()).collect();
        quiz_ids.sort();
        quiz_ids.dedup();
        let quizzes = self.quiz_repository.find_by_ids(&quiz_ids).await?;
        let titles: HashMap<&str, &str> = quizzes
            .iter()
            .map(|q| (q.id.as_str(), q.title.as_str()))
            .collect();

        let mut student_ids: Vec<String> = scores.iter().map(|s| s.student_id.clone()).collect();
        student_ids.sort();
        student_ids.dedup();
        let students = self.roster_repository.find_students(&student_ids).await?;
        let students: HashMap<&str, &Student> =
            students.iter().map(|s| (s.id.as_str(), s)).collect();

        Ok(scores
            .iter()
            .map(|score| {
                QuizScoreRow::from_score(
                    score,
                    students.get(score.student_id.as_str()).copied(),
                    titles.get(score.quiz_id.as_str()).copied().unwrap_or(""),
                )
            })
            .collect())
    }

    async fn scope_quiz_ids(&self, query: &AnalyticsQuery) -> AppResult<Option<Vec<String>>> {
        if let Some(quiz_id) = &query.quiz_id {
            return Ok(Some(vec![quiz_id.clone()]));
        }
        if let Some(teacher_id) = &query.teacher_id {
            let quizzes = self.quiz_repository.find_by_teacher(teacher_id).await?;
            return Ok(Some(quizzes.into_iter().map(|q| q.id).collect()));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::models::domain::{Choice, Question, Quiz, QuizScore, RawAnswer, StudentResponse};
    use crate::repositories::quiz_repository::MockQuizRepository;
    use crate::repositories::roster_repository::MockRosterRepository;
    use crate::repositories::submission_repository::MockSubmissionRepository;

    fn sample_quiz() -> Quiz {
        let mut quiz = Quiz::new(
            "Mixed Quiz",
            "classroom-1",
            "teacher-1",
            vec![
                Question::single(
                    "q-1",
                    "Which organelle produces ATP?",
                    vec![
                        Choice::new("7", "Mitochondria", true),
                        Choice::new("8", "Nucleus", false),
                    ],
                ),
                Question::identification("q-2", "Capital of France?", "Paris"),
            ],
        );
        quiz.id = "quiz-1".to_string();
        quiz
    }

    fn response_with(answers: Vec<(&str, RawAnswer)>) -> StudentResponse {
        let answers: HashMap<String, RawAnswer> = answers
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        StudentResponse::new("quiz-1", "classroom-1", "student-1", answers)
    }

    fn service_with(
        quizzes: MockQuizRepository,
        submissions: MockSubmissionRepository,
        roster: MockRosterRepository,
    ) -> AnalyticsService {
        AnalyticsService::new(Arc::new(quizzes), Arc::new(submissions), Arc::new(roster))
    }

    #[actix_rt::test]
    async fn performance_recomputes_correctness_from_raw_answers() {
        let mut quizzes = MockQuizRepository::new();
        quizzes
            .expect_find_by_ids()
            .returning(|_| Ok(vec![sample_quiz()]));

        let mut submissions = MockSubmissionRepository::new();
        submissions.expect_find_responses().returning(|_| {
            Ok(vec![
                response_with(vec![
                    ("q-1", RawAnswer::Int(7)),
                    ("q-2", RawAnswer::from("paris")),
                ]),
                response_with(vec![
                    ("q-1", RawAnswer::Int(8)),
                    ("q-2", RawAnswer::from("Lyon")),
                ]),
            ])
        });

        let service = service_with(quizzes, submissions, MockRosterRepository::new());

        let performance = service
            .question_type_performance(&AnalyticsQuery::default())
            .await
            .expect("performance should compute");

        assert_eq!(performance.get("single"), Some(&50.0));
        assert_eq!(performance.get("identification"), Some(&50.0));
        // No attempts for these types, so they are absent entirely.
        assert_eq!(performance.get("multi"), None);
        assert_eq!(performance.get("true_false"), None);
    }

    #[actix_rt::test]
    async fn performance_skips_answers_to_unknown_questions() {
        let mut quizzes = MockQuizRepository::new();
        quizzes
            .expect_find_by_ids()
            .returning(|_| Ok(vec![sample_quiz()]));

        let mut submissions = MockSubmissionRepository::new();
        submissions.expect_find_responses().returning(|_| {
            Ok(vec![response_with(vec![
                ("q-1", RawAnswer::Int(7)),
                ("q-deleted", RawAnswer::from("orphaned")),
            ])])
        });

        let service = service_with(quizzes, submissions, MockRosterRepository::new());

        let performance = service
            .question_type_performance(&AnalyticsQuery::default())
            .await
            .expect("performance should compute");

        assert_eq!(performance.get("single"), Some(&100.0));
        assert_eq!(performance.len(), 1);
    }

    #[actix_rt::test]
    async fn pass_fail_breakdown_requires_a_scope() {
        let service = service_with(
            MockQuizRepository::new(),
            MockSubmissionRepository::new(),
            MockRosterRepository::new(),
        );

        let err = service
            .quiz_pass_fail_breakdown(None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[actix_rt::test]
    async fn pass_fail_breakdown_trusts_persisted_scores() {
        let mut quizzes = MockQuizRepository::new();
        quizzes
            .expect_find_by_id()
            .returning(|_| Ok(Some(sample_quiz())));

        let mut submissions = MockSubmissionRepository::new();
        submissions.expect_find_scores_by_quiz().returning(|_| {
            Ok(vec![
                QuizScore::new(
                    "student-1",
                    "quiz-1",
                    "classroom-1",
                    "response-1",
                    2,
                    2,
                    100.0,
                    ScoreStatus::Passed,
                ),
                QuizScore::new(
                    "student-2",
                    "quiz-1",
                    "classroom-1",
                    "response-2",
                    0,
                    2,
                    0.0,
                    ScoreStatus::Failed,
                ),
                QuizScore::new(
                    "student-3",
                    "quiz-1",
                    "classroom-2",
                    "response-3",
                    2,
                    2,
                    100.0,
                    ScoreStatus::Passed,
                ),
            ])
        });

        let mut roster = MockRosterRepository::new();
        roster.expect_find_classrooms().returning(|_| Ok(vec![]));

        let service = service_with(quizzes, submissions, roster);

        let breakdowns = service
            .quiz_pass_fail_breakdown(Some("quiz-1"), None)
            .await
            .expect("breakdown should compute");

        assert_eq!(breakdowns.len(), 1);
        let breakdown = &breakdowns[0];
        assert_eq!(breakdown.total_passed, 2);
        assert_eq!(breakdown.total_failed, 1);
        assert_eq!(breakdown.classroom_breakdown.len(), 2);
        // Unknown classrooms fall back to their raw id.
        assert_eq!(breakdown.classroom_breakdown[0].classroom_name, "classroom-1");
    }

    #[actix_rt::test]
    async fn distribution_counts_questions_per_type() {
        let mut quizzes = MockQuizRepository::new();
        quizzes
            .expect_find_all()
            .returning(|| Ok(vec![sample_quiz(), sample_quiz()]));

        let service = service_with(
            quizzes,
            MockSubmissionRepository::new(),
            MockRosterRepository::new(),
        );

        let distribution = service
            .question_type_distribution()
            .await
            .expect("distribution should compute");

        assert_eq!(distribution.labels, vec!["identification", "single"]);
        assert_eq!(distribution.counts, vec![2, 2]);
    }
}
