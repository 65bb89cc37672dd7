pub mod quiz_repository;
pub mod roster_repository;
pub mod submission_repository;

pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use roster_repository::{MongoRosterRepository, RosterRepository};
pub use submission_repository::{MongoSubmissionRepository, ResponseFilter, SubmissionRepository};
