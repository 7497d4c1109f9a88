use crate::dto::attempt_dto::{
    AnswerDetail, AttemptResponse, ExamBrief, QuestionReveal, SubmitAttemptRequest,
};
use crate::error::{Error, Result};
use crate::models::answer::Answer;
use crate::models::attempt::ExamAttempt;
use crate::models::exam::Exam;
use crate::models::question::Question;
use crate::services::grading_service::GradingService;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct AttemptService {
    pool: PgPool,
}

impl AttemptService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Grades a submission and persists the attempt with its answers as one
    /// transactional unit.
    ///
    /// Submitted answers referencing questions outside the exam still grade as
    /// incorrect but are not persisted: every stored answer must point at a
    /// question of the attempt's exam.
    pub async fn submit_attempt(&self, payload: SubmitAttemptRequest) -> Result<AttemptResponse> {
        let exam = sqlx::query_as::<_, Exam>(r#"SELECT * FROM exams WHERE id = $1"#)
            .bind(payload.exam_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Exam not found".to_string()))?;

        let questions = sqlx::query_as::<_, Question>(
            r#"SELECT * FROM questions WHERE exam_id = $1 ORDER BY order_index"#,
        )
        .bind(exam.id)
        .fetch_all(&self.pool)
        .await?;

        if questions.is_empty() {
            return Err(Error::BadRequest("Exam has no questions".to_string()));
        }

        let (graded, score) = GradingService::grade(&questions, &payload.answers);

        let completed_at: DateTime<Utc> = Utc::now();
        let mut tx = self.pool.begin().await?;

        let attempt = sqlx::query_as::<_, ExamAttempt>(
            r#"
            INSERT INTO exam_attempts (exam_id, student_name, completed_at, score)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(exam.id)
        .bind(&payload.student_name)
        .bind(completed_at)
        .bind(score)
        .fetch_one(&mut *tx)
        .await?;

        for answer in &graded {
            if !questions.iter().any(|q| q.id == answer.question_id) {
                tracing::warn!(
                    question_id = %answer.question_id,
                    exam_id = %exam.id,
                    "submitted answer references a question outside the exam; skipping"
                );
                continue;
            }

            sqlx::query(
                r#"
                INSERT INTO answers (attempt_id, question_id, selected_option, is_correct)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(attempt.id)
            .bind(answer.question_id)
            .bind(answer.selected_option)
            .bind(answer.is_correct)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get_attempt_detail(attempt.id).await
    }

    /// Attempt with exam summary and per-answer detail, correct options revealed.
    pub async fn get_attempt_detail(&self, attempt_id: Uuid) -> Result<AttemptResponse> {
        let attempt = sqlx::query_as::<_, ExamAttempt>(
            r#"SELECT * FROM exam_attempts WHERE id = $1"#,
        )
        .bind(attempt_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Attempt not found".to_string()))?;

        let exam = sqlx::query_as::<_, Exam>(r#"SELECT * FROM exams WHERE id = $1"#)
            .bind(attempt.exam_id)
            .fetch_one(&self.pool)
            .await?;

        let answers = sqlx::query_as::<_, Answer>(
            r#"
            SELECT ans.*
            FROM answers ans
            JOIN questions q ON q.id = ans.question_id
            WHERE ans.attempt_id = $1
            ORDER BY q.order_index
            "#,
        )
        .bind(attempt.id)
        .fetch_all(&self.pool)
        .await?;

        let questions = sqlx::query_as::<_, Question>(
            r#"SELECT * FROM questions WHERE exam_id = $1"#,
        )
        .bind(attempt.exam_id)
        .fetch_all(&self.pool)
        .await?;

        let details = answers
            .into_iter()
            .filter_map(|answer| {
                let question = questions.iter().find(|q| q.id == answer.question_id)?;
                Some(AnswerDetail {
                    question_id: answer.question_id,
                    selected_option: answer.selected_option,
                    is_correct: answer.is_correct,
                    question: QuestionReveal {
                        question: question.question.clone(),
                        option_a: question.option_a.clone(),
                        option_b: question.option_b.clone(),
                        option_c: question.option_c.clone(),
                        option_d: question.option_d.clone(),
                        correct_option: question.correct_option,
                        order_index: question.order_index,
                    },
                })
            })
            .collect();

        Ok(AttemptResponse {
            id: attempt.id,
            exam_id: attempt.exam_id,
            student_name: attempt.student_name,
            started_at: attempt.started_at,
            completed_at: attempt.completed_at,
            score: attempt.score,
            exam: ExamBrief {
                title: exam.title,
                description: exam.description,
                duration_minutes: exam.duration_minutes,
            },
            answers: details,
        })
    }
}
