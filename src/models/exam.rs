use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "duration")]
    pub duration_minutes: i32,
    pub total_questions: i32,
    pub questions_to_show: i32,
    pub randomize_questions: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
