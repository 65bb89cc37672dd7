pub mod analytics_service;
pub mod submission_service;

pub use analytics_service::AnalyticsService;
pub use submission_service::SubmissionService;
