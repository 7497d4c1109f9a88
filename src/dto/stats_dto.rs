use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub overview: Overview,
    pub recent_attempts: Vec<RecentAttempt>,
    pub exam_stats: Vec<ExamStats>,
    pub score_distribution: ScoreDistribution,
    pub monthly_attempts: Vec<MonthlyAttempts>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_exams: i64,
    pub total_attempts: i64,
    pub avg_score: f64,
    pub total_students: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RecentAttempt {
    pub id: Uuid,
    pub student_name: String,
    pub exam_title: String,
    pub score: i32,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Per-exam leaderboard entry, sorted by average score.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ExamStats {
    pub id: Uuid,
    pub title: String,
    pub total_attempts: i64,
    pub total_questions: i64,
    pub avg_score: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreDistribution {
    /// 90-100
    pub excellent: i64,
    /// 70-89
    pub good: i64,
    /// 50-69
    pub average: i64,
    /// 0-49
    pub poor: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyAttempts {
    pub month: String,
    pub attempts: i64,
}
