pub mod question;
pub mod quiz;
pub mod quiz_score;
pub mod roster;
pub mod student_response;

pub use question::{Choice, Question, QuestionType};
pub use quiz::Quiz;
pub use quiz_score::{QuizScore, ScoreStatus};
pub use roster::{Classroom, Student};
pub use student_response::{RawAnswer, StudentResponse};
