use crate::dto::stats_dto::{
    DashboardStats, ExamStats, MonthlyAttempts, Overview, RecentAttempt, ScoreDistribution,
};
use crate::error::Result;
use chrono::{DateTime, Datelike, Duration, Utc};
use sqlx::PgPool;

const MONTH_ABBREVS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Clone)]
pub struct StatsService {
    pool: PgPool,
}

impl StatsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Aggregates the dashboard numbers. Only completed attempts count.
    pub async fn dashboard(&self) -> Result<DashboardStats> {
        let total_exams: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM exams"#)
            .fetch_one(&self.pool)
            .await?;

        let total_attempts: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM exam_attempts WHERE completed_at IS NOT NULL"#,
        )
        .fetch_one(&self.pool)
        .await?;

        let avg_score: Option<f64> = sqlx::query_scalar(
            r#"SELECT AVG(score)::float8 FROM exam_attempts WHERE completed_at IS NOT NULL"#,
        )
        .fetch_one(&self.pool)
        .await?;

        let total_students: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(DISTINCT student_name) FROM exam_attempts WHERE completed_at IS NOT NULL"#,
        )
        .fetch_one(&self.pool)
        .await?;

        let recent_attempts = sqlx::query_as::<_, RecentAttempt>(
            r#"
            SELECT a.id, a.student_name, e.title AS exam_title, a.score, a.completed_at
            FROM exam_attempts a
            JOIN exams e ON e.id = a.exam_id
            WHERE a.completed_at IS NOT NULL
            ORDER BY a.completed_at DESC
            LIMIT 10
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let exam_stats = sqlx::query_as::<_, ExamStats>(
            r#"
            SELECT
                e.id, e.title,
                COUNT(a.id) AS total_attempts,
                (SELECT COUNT(*) FROM questions q WHERE q.exam_id = e.id) AS total_questions,
                COALESCE(AVG(a.score), 0)::float8 AS avg_score,
                e.created_at
            FROM exams e
            LEFT JOIN exam_attempts a
                ON a.exam_id = e.id AND a.completed_at IS NOT NULL
            GROUP BY e.id
            ORDER BY avg_score DESC, total_attempts DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let scores: Vec<i32> = sqlx::query_scalar(
            r#"SELECT score FROM exam_attempts WHERE completed_at IS NOT NULL"#,
        )
        .fetch_all(&self.pool)
        .await?;

        let now = Utc::now();
        let window_start = now - Duration::days(6 * 31);
        let completed: Vec<DateTime<Utc>> = sqlx::query_scalar(
            r#"
            SELECT completed_at FROM exam_attempts
            WHERE completed_at IS NOT NULL AND completed_at >= $1
            "#,
        )
        .bind(window_start)
        .fetch_all(&self.pool)
        .await?;

        Ok(DashboardStats {
            overview: Overview {
                total_exams,
                total_attempts,
                avg_score: avg_score.unwrap_or(0.0),
                total_students,
            },
            recent_attempts,
            exam_stats,
            score_distribution: score_distribution(&scores),
            monthly_attempts: monthly_attempt_counts(now, &completed),
        })
    }
}

fn score_distribution(scores: &[i32]) -> ScoreDistribution {
    let mut distribution = ScoreDistribution::default();
    for score in scores {
        match score {
            90..=100 => distribution.excellent += 1,
            70..=89 => distribution.good += 1,
            50..=69 => distribution.average += 1,
            _ => distribution.poor += 1,
        }
    }
    distribution
}

/// Completed-attempt counts per calendar month, oldest first, covering the
/// current month and the five before it.
fn monthly_attempt_counts(
    now: DateTime<Utc>,
    completed: &[DateTime<Utc>],
) -> Vec<MonthlyAttempts> {
    (0..6)
        .rev()
        .map(|months_back| {
            let mut month = now.month() as i32 - months_back;
            let mut year = now.year();
            if month <= 0 {
                month += 12;
                year -= 1;
            }

            let attempts = completed
                .iter()
                .filter(|t| t.year() == year && t.month() as i32 == month)
                .count() as i64;

            MonthlyAttempts {
                month: MONTH_ABBREVS[(month - 1) as usize].to_string(),
                attempts,
            }
        })
        .collect()
}
