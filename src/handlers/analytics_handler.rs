use actix_web::{get, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{AnalyticsQuery, PassFailQuery, ScoreListQuery},
};

#[get("/api/analytics/question-type-performance")]
pub async fn question_type_performance(
    state: web::Data<AppState>,
    query: web::Query<AnalyticsQuery>,
) -> Result<HttpResponse, AppError> {
    let performance = state
        .analytics_service
        .question_type_performance(&query)
        .await?;
    Ok(HttpResponse::Ok().json(performance))
}

#[get("/api/analytics/quiz-pass-fail")]
pub async fn quiz_pass_fail(
    state: web::Data<AppState>,
    query: web::Query<PassFailQuery>,
) -> Result<HttpResponse, AppError> {
    let breakdowns = state
        .analytics_service
        .quiz_pass_fail_breakdown(query.quiz_id.as_deref(), query.teacher_id.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(breakdowns))
}

#[get("/api/analytics/question-type-distribution")]
pub async fn question_type_distribution(
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let distribution = state.analytics_service.question_type_distribution().await?;
    Ok(HttpResponse::Ok().json(distribution))
}

#[get("/api/classrooms/{classroom_id}/quiz-scores")]
pub async fn classroom_quiz_scores(
    state: web::Data<AppState>,
    classroom_id: web::Path<String>,
    query: web::Query<ScoreListQuery>,
) -> Result<HttpResponse, AppError> {
    let scores = state
        .analytics_service
        .classroom_scores(&classroom_id, query.quiz_id.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(scores))
}
