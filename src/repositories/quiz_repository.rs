use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

#[cfg(test)]
use mockall::automock;

use crate::{config::Config, db::Database, errors::AppResult, models::domain::Quiz};

/// Read-only quiz definitions. Grading never writes here; quizzes are
/// authored by the excluded classroom-management side.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>>;
    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Quiz>>;
    /// Quizzes created by one teacher, newest first.
    async fn find_by_teacher(&self, teacher_id: &str) -> AppResult<Vec<Quiz>>;
    async fn find_all(&self) -> AppResult<Vec<Quiz>>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database, config: &Config) -> Self {
        let collection = db.get_collection(&config.quizzes_collection);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let teacher_index = IndexModel::builder()
            .keys(doc! { "created_by_teacher_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("created_by_teacher".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(teacher_index).await?;

        log::info!("Successfully created indexes for quizzes collection");
        Ok(())
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "id": id }).await?;
        Ok(quiz)
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Quiz>> {
        let quizzes = self
            .collection
            .find(doc! { "id": { "$in": ids.to_vec() } })
            .await?
            .try_collect()
            .await?;
        Ok(quizzes)
    }

    async fn find_by_teacher(&self, teacher_id: &str) -> AppResult<Vec<Quiz>> {
        let quizzes = self
            .collection
            .find(doc! { "created_by_teacher_id": teacher_id })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(quizzes)
    }

    async fn find_all(&self) -> AppResult<Vec<Quiz>> {
        let quizzes = self
            .collection
            .find(doc! {})
            .await?
            .try_collect()
            .await?;
        Ok(quizzes)
    }
}
