pub mod attempts;
pub mod exams;
pub mod health;
pub mod stats;

use crate::AppState;
use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    routing::{get, post},
    Json, Router,
};

/// `axum::Json` with malformed or incomplete bodies surfaced as 400 rather
/// than the extractor's default 422.
pub struct JsonInput<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonInput<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = crate::error::Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|err| crate::error::Error::BadRequest(err.body_text()))?;
        Ok(JsonInput(value))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/exams", get(exams::list_exams).post(exams::create_exam))
        .route("/exams/:id", get(exams::get_exam))
        .route("/attempts", post(attempts::submit_attempt))
        .route("/attempts/:id", get(attempts::get_attempt))
        .route("/stats", get(stats::get_stats))
        .with_state(state)
}
