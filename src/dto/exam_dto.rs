use crate::models::exam::Exam;
use crate::models::question::{OptionTag, Question};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateExamRequest {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "duration")]
    #[validate(range(min = 1, message = "duration must be at least one minute"))]
    pub duration_minutes: i32,
    #[validate(length(min = 1, message = "at least one question is required"))]
    pub questions: Vec<CreateQuestion>,
    pub questions_to_show: Option<i32>,
    pub randomize_questions: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestion {
    #[validate(length(min = 1, message = "question text is required"))]
    pub question: String,
    #[validate(length(min = 1, message = "option A is required"))]
    pub option_a: String,
    #[validate(length(min = 1, message = "option B is required"))]
    pub option_b: String,
    #[validate(length(min = 1, message = "option C is required"))]
    pub option_c: String,
    #[validate(length(min = 1, message = "option D is required"))]
    pub option_d: String,
    pub correct_option: OptionTag,
}

/// One row of `GET /exams`.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ExamSummary {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "duration")]
    pub duration_minutes: i32,
    pub total_questions: i32,
    pub questions_to_show: i32,
    pub randomize_questions: bool,
    pub attempt_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Created exam echoed back to the author, correct options included.
#[derive(Debug, Clone, Serialize)]
pub struct ExamWithQuestions {
    #[serde(flatten)]
    pub exam: Exam,
    pub questions: Vec<Question>,
}

/// A question as presented to a student: no correct option.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuestion {
    pub id: Uuid,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    #[serde(rename = "order")]
    pub order_index: i32,
}

impl From<Question> for PublicQuestion {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question: q.question,
            option_a: q.option_a,
            option_b: q.option_b,
            option_c: q.option_c,
            option_d: q.option_d,
            order_index: q.order_index,
        }
    }
}

/// `GET /exams/{id}`: the exam with its selector-applied question subset.
#[derive(Debug, Clone, Serialize)]
pub struct ExamDetailResponse {
    #[serde(flatten)]
    pub exam: Exam,
    pub questions: Vec<PublicQuestion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_question() -> CreateQuestion {
        CreateQuestion {
            question: "2 + 2?".into(),
            option_a: "3".into(),
            option_b: "4".into(),
            option_c: "5".into(),
            option_d: "6".into(),
            correct_option: OptionTag::B,
        }
    }

    #[test]
    fn create_exam_requires_questions() {
        let req = CreateExamRequest {
            title: "Math".into(),
            description: None,
            duration_minutes: 30,
            questions: vec![],
            questions_to_show: None,
            randomize_questions: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_exam_requires_title_and_duration() {
        let req = CreateExamRequest {
            title: "".into(),
            description: None,
            duration_minutes: 0,
            questions: vec![valid_question()],
            questions_to_show: None,
            randomize_questions: None,
        };
        let errs = req.validate().unwrap_err();
        assert_eq!(errs.field_errors().len(), 2);
    }

    #[test]
    fn valid_request_passes() {
        let req = CreateExamRequest {
            title: "Math".into(),
            description: Some("basics".into()),
            duration_minutes: 30,
            questions: vec![valid_question()],
            questions_to_show: Some(1),
            randomize_questions: Some(false),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn public_question_drops_correct_option() {
        let q = Question {
            id: Uuid::new_v4(),
            exam_id: Uuid::new_v4(),
            question: "2 + 2?".into(),
            option_a: "3".into(),
            option_b: "4".into(),
            option_c: "5".into(),
            option_d: "6".into(),
            correct_option: OptionTag::B,
            order_index: 1,
        };
        let public = PublicQuestion::from(q);
        let json = serde_json::to_value(&public).unwrap();
        assert!(json.get("correctOption").is_none());
        assert_eq!(json["order"], 1);
    }
}
