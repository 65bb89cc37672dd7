use crate::models::domain::{Choice, Question, Quiz, Student};
