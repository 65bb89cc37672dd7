use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub quizzes_collection: String,
    pub students_collection: String,
    pub classrooms_collection: String,
    pub responses_collection: String,
    pub scores_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "classhub-local".to_string()),
            quizzes_collection: env::var("QUIZZES_COLLECTION")
                .unwrap_or_else(|_| "quizzes".to_string()),
            students_collection: env::var("STUDENTS_COLLECTION")
                .unwrap_or_else(|_| "students".to_string()),
            classrooms_collection: env::var("CLASSROOMS_COLLECTION")
                .unwrap_or_else(|_| "classrooms".to_string()),
            responses_collection: env::var("RESPONSES_COLLECTION")
                .unwrap_or_else(|_| "student_responses".to_string()),
            scores_collection: env::var("SCORES_COLLECTION")
                .unwrap_or_else(|_| "quiz_scores".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "classhub-test".to_string(),
            quizzes_collection: "quizzes".to_string(),
            students_collection: "students".to_string(),
            classrooms_collection: "classrooms".to_string(),
            responses_collection: "student_responses".to_string(),
            scores_collection: "quiz_scores".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
        }
    }
}
