use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoQuizRepository, MongoRosterRepository, MongoSubmissionRepository},
    services::{AnalyticsService, SubmissionService},
};

#[derive(Clone)]
pub struct AppState {
    pub submission_service: Arc<SubmissionService>,
    pub analytics_service: Arc<AnalyticsService>,
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db, &config));
        quiz_repository.ensure_indexes().await?;

        let submission_repository = Arc::new(MongoSubmissionRepository::new(&db, &config));
        submission_repository.ensure_indexes().await?;

        let roster_repository = Arc::new(MongoRosterRepository::new(&db, &config));

        let submission_service = Arc::new(SubmissionService::new(
            quiz_repository.clone(),
            submission_repository.clone(),
            roster_repository.clone(),
        ));
        let analytics_service = Arc::new(AnalyticsService::new(
            quiz_repository,
            submission_repository,
            roster_repository,
        ));

        Ok(Self {
            submission_service,
            analytics_service,
            db,
            config: Arc::new(config),
        })
    }
}
