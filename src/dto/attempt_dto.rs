use crate::models::question::OptionTag;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAttemptRequest {
    pub exam_id: Uuid,
    #[validate(length(min = 1, message = "student name is required"))]
    pub student_name: String,
    pub answers: Vec<SubmittedAnswer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub question_id: Uuid,
    /// `null` or absent means the student left the question blank.
    #[serde(default)]
    pub selected_option: Option<OptionTag>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamBrief {
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "duration")]
    pub duration_minutes: i32,
}

/// Post-hoc reveal of the graded question, correct option included.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionReveal {
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_option: OptionTag,
    #[serde(rename = "order")]
    pub order_index: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDetail {
    pub question_id: Uuid,
    pub selected_option: Option<OptionTag>,
    pub is_correct: bool,
    pub question: QuestionReveal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptResponse {
    pub id: Uuid,
    pub exam_id: Uuid,
    pub student_name: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub score: i32,
    pub exam: ExamBrief,
    pub answers: Vec<AnswerDetail>,
}
