use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, bson::Document, options::IndexOptions, Collection, IndexModel};

#[cfg(test)]
use mockall::automock;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    models::domain::{QuizScore, StudentResponse},
};

/// Scopes an analytics read over stored responses. An empty filter means
/// the whole dataset.
#[derive(Clone, Debug, Default)]
pub struct ResponseFilter {
    pub classroom_id: Option<String>,
    pub quiz_ids: Option<Vec<String>>,
}

/// Owns the StudentResponse and QuizScore rows. The two are only ever
/// written together through `insert_graded`; a response must never exist
/// without its score, and vice versa.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Persist a response and its score in a single atomic unit.
    async fn insert_graded(
        &self,
        response: StudentResponse,
        score: QuizScore,
    ) -> AppResult<(StudentResponse, QuizScore)>;

    async fn has_submitted(&self, student_id: &str, quiz_id: &str) -> AppResult<bool>;

    async fn find_responses(&self, filter: ResponseFilter) -> AppResult<Vec<StudentResponse>>;

    async fn find_scores_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<QuizScore>>;

    /// Scores in one classroom, optionally one quiz, newest first.
    async fn find_scores_by_classroom(
        &self,
        classroom_id: &str,
        quiz_id: Option<&str>,
    ) -> AppResult<Vec<QuizScore>>;
}

pub struct MongoSubmissionRepository {
    responses: Collection<StudentResponse>,
    scores: Collection<QuizScore>,
    db: Database,
}

impl MongoSubmissionRepository {
    pub fn new(db: &Database, config: &Config) -> Self {
        let responses = db.get_collection(&config.responses_collection);
        let scores = db.get_collection(&config.scores_collection);
        Self {
            responses,
            scores,
            db: db.clone(),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for response and score collections");

        let response_id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        // One response per student per quiz, enforced at the storage level
        // as well as in the ingestion pipeline.
        let student_quiz_index = IndexModel::builder()
            .keys(doc! { "student_id": 1, "quiz_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("student_quiz_unique".to_string())
                    .build(),
            )
            .build();

        self.responses.create_index(response_id_index).await?;
        self.responses.create_index(student_quiz_index).await?;

        let score_id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        // One score per response.
        let score_response_index = IndexModel::builder()
            .keys(doc! { "response_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("response_unique".to_string())
                    .build(),
            )
            .build();

        let score_quiz_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1 })
            .options(IndexOptions::builder().name("quiz".to_string()).build())
            .build();

        let score_classroom_index = IndexModel::builder()
            .keys(doc! { "classroom_id": 1, "quiz_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("classroom_quiz".to_string())
                    .build(),
            )
            .build();

        self.scores.create_index(score_id_index).await?;
        self.scores.create_index(score_response_index).await?;
        self.scores.create_index(score_quiz_index).await?;
        self.scores.create_index(score_classroom_index).await?;

        log::info!("Successfully created indexes for response and score collections");
        Ok(())
    }

    fn response_filter_document(filter: &ResponseFilter) -> Document {
        let mut document = doc! {};
        if let Some(classroom_id) = &filter.classroom_id {
            document.insert("classroom_id", classroom_id.clone());
        }
        if let Some(quiz_ids) = &filter.quiz_ids {
            document.insert("quiz_id", doc! { "$in": quiz_ids.clone() });
        }
        document
    }
}

#[async_trait]
impl SubmissionRepository for MongoSubmissionRepository {
    async fn insert_graded(
        &self,
        response: StudentResponse,
        score: QuizScore,
    ) -> AppResult<(StudentResponse, QuizScore)> {
        let mut session = self.db.start_session().await?;
        session.start_transaction().await?;

        let write = async {
            self.responses
                .insert_one(&response)
                .session(&mut session)
                .await?;
            self.scores.insert_one(&score).session(&mut session).await?;
            Ok::<(), mongodb::error::Error>(())
        }
        .await;

        match write {
            Ok(()) => {
                session.commit_transaction().await?;
                Ok((response, score))
            }
            Err(err) => {
                if let Err(abort_err) = session.abort_transaction().await {
                    log::warn!(
                        "Failed to abort response/score transaction: {}",
                        abort_err
                    );
                }
                Err(err.into())
            }
        }
    }

    async fn has_submitted(&self, student_id: &str, quiz_id: &str) -> AppResult<bool> {
        let response = self
            .responses
            .find_one(doc! { "student_id": student_id, "quiz_id": quiz_id })
            .await?;
        Ok(response.is_some())
    }

    async fn find_responses(&self, filter: ResponseFilter) -> AppResult<Vec<StudentResponse>> {
        let responses = self
            .responses
            .find(Self::response_filter_document(&filter))
            .await?
            .try_collect()
            .await?;
        Ok(responses)
    }

    async fn find_scores_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<QuizScore>> {
        let scores = self
            .scores
            .find(doc! { "quiz_id": quiz_id })
            .await?
            .try_collect()
            .await?;
        Ok(scores)
    }

    async fn find_scores_by_classroom(
        &self,
        classroom_id: &str,
        quiz_id: Option<&str>,
    ) -> AppResult<Vec<QuizScore>> {
        let mut filter = doc! { "classroom_id": classroom_id };
        if let Some(quiz_id) = quiz_id {
            filter.insert("quiz_id", quiz_id);
        }

        let scores = self
            .scores
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(scores)
    }
}
