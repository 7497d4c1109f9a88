use axum::{extract::State, response::IntoResponse, Json};

use crate::AppState;

#[axum::debug_handler]
pub async fn get_stats(State(state): State<AppState>) -> crate::error::Result<impl IntoResponse> {
    let stats = state.stats_service.dashboard().await?;
    Ok(Json(stats))
}
