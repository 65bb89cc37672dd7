pub mod analytics_handler;
pub mod health_handler;
pub mod submission_handler;

pub use analytics_handler::{
    classroom_quiz_scores, question_type_distribution, question_type_performance, quiz_pass_fail,
};
pub use health_handler::health_check;
pub use submission_handler::{has_submitted, submit_quiz_response};
