use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::attempt_dto::SubmitAttemptRequest;
use crate::routes::JsonInput;
use crate::AppState;

#[axum::debug_handler]
pub async fn submit_attempt(
    State(state): State<AppState>,
    JsonInput(payload): JsonInput<SubmitAttemptRequest>,
) -> crate::error::Result<impl IntoResponse> {
    payload.validate()?;
    let attempt = state.attempt_service.submit_attempt(payload).await?;
    Ok((StatusCode::CREATED, Json(attempt)))
}

#[axum::debug_handler]
pub async fn get_attempt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> crate::error::Result<impl IntoResponse> {
    let attempt = state.attempt_service.get_attempt_detail(id).await?;
    Ok(Json(attempt))
}
