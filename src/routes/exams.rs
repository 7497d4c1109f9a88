use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::exam_dto::{CreateExamRequest, ExamDetailResponse, PublicQuestion};
use crate::routes::JsonInput;
use crate::services::selection_service::SelectionService;
use crate::AppState;

#[axum::debug_handler]
pub async fn list_exams(State(state): State<AppState>) -> crate::error::Result<impl IntoResponse> {
    let exams = state.exam_service.list_exams().await?;
    Ok(Json(exams))
}

#[axum::debug_handler]
pub async fn create_exam(
    State(state): State<AppState>,
    JsonInput(payload): JsonInput<CreateExamRequest>,
) -> crate::error::Result<impl IntoResponse> {
    payload.validate()?;
    let exam = state.exam_service.create_exam(payload).await?;
    Ok((StatusCode::CREATED, Json(exam)))
}

/// The exam as a student sees it: the selector-applied question subset with
/// correct options withheld.
#[axum::debug_handler]
pub async fn get_exam(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> crate::error::Result<impl IntoResponse> {
    let (exam, questions) = state.exam_service.get_exam_with_questions(id).await?;

    let selected = SelectionService::select(
        questions,
        exam.questions_to_show,
        exam.randomize_questions,
        &mut rand::thread_rng(),
    );

    let response = ExamDetailResponse {
        exam,
        questions: selected.into_iter().map(PublicQuestion::from).collect(),
    };
    Ok(Json(response))
}
