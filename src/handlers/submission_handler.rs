use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState, errors::AppError, models::dto::request::SubmitQuizResponseRequest,
};

#[post("/api/quizzes/{quiz_id}/responses")]
pub async fn submit_quiz_response(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    request: web::Json<SubmitQuizResponseRequest>,
) -> Result<HttpResponse, AppError> {
    let receipt = state
        .submission_service
        .submit(&quiz_id, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(receipt))
}

#[get("/api/quizzes/{quiz_id}/responses/{student_id}/submitted")]
pub async fn has_submitted(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (quiz_id, student_id) = path.into_inner();
    let response = state
        .submission_service
        .has_submitted(&student_id, &quiz_id)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}
