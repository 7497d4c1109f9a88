use crate::dto::exam_dto::{CreateExamRequest, ExamSummary, ExamWithQuestions};
use crate::error::{Error, Result};
use crate::models::exam::Exam;
use crate::models::question::Question;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

#[derive(Clone)]
pub struct ExamService {
    pool: PgPool,
}

impl ExamService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates an exam together with its questions in one transaction.
    ///
    /// `questions_to_show` is clamped to the question count; zero or absent
    /// means every question is shown.
    pub async fn create_exam(&self, payload: CreateExamRequest) -> Result<ExamWithQuestions> {
        for question in &payload.questions {
            question.validate()?;
        }

        let total_questions = payload.questions.len() as i32;
        let questions_to_show = payload
            .questions_to_show
            .filter(|n| *n > 0)
            .map(|n| n.min(total_questions))
            .unwrap_or(total_questions);

        let mut tx = self.pool.begin().await?;

        let exam = sqlx::query_as::<_, Exam>(
            r#"
            INSERT INTO exams (
                title, description, duration_minutes,
                total_questions, questions_to_show, randomize_questions
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(payload.duration_minutes)
        .bind(total_questions)
        .bind(questions_to_show)
        .bind(payload.randomize_questions.unwrap_or(false))
        .fetch_one(&mut *tx)
        .await?;

        let mut questions = Vec::with_capacity(payload.questions.len());
        for (idx, q) in payload.questions.iter().enumerate() {
            let question = sqlx::query_as::<_, Question>(
                r#"
                INSERT INTO questions (
                    exam_id, question, option_a, option_b, option_c, option_d,
                    correct_option, order_index
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING *
                "#,
            )
            .bind(exam.id)
            .bind(&q.question)
            .bind(&q.option_a)
            .bind(&q.option_b)
            .bind(&q.option_c)
            .bind(&q.option_d)
            .bind(q.correct_option)
            .bind((idx as i32) + 1)
            .fetch_one(&mut *tx)
            .await?;
            questions.push(question);
        }

        tx.commit().await?;

        Ok(ExamWithQuestions { exam, questions })
    }

    pub async fn list_exams(&self) -> Result<Vec<ExamSummary>> {
        let summaries = sqlx::query_as::<_, ExamSummary>(
            r#"
            SELECT
                e.id, e.title, e.description, e.duration_minutes,
                e.total_questions, e.questions_to_show, e.randomize_questions,
                COUNT(a.id) AS attempt_count,
                e.created_at
            FROM exams e
            LEFT JOIN exam_attempts a ON a.exam_id = e.id
            GROUP BY e.id
            ORDER BY e.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    pub async fn get_exam_with_questions(&self, exam_id: Uuid) -> Result<(Exam, Vec<Question>)> {
        let exam = sqlx::query_as::<_, Exam>(r#"SELECT * FROM exams WHERE id = $1"#)
            .bind(exam_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Exam not found".to_string()))?;

        let questions = sqlx::query_as::<_, Question>(
            r#"SELECT * FROM questions WHERE exam_id = $1 ORDER BY order_index"#,
        )
        .bind(exam_id)
        .fetch_all(&self.pool)
        .await?;

        Ok((exam, questions))
    }
}
