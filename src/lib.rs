pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use crate::services::{
    attempt_service::AttemptService, exam_service::ExamService, stats_service::StatsService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub exam_service: ExamService,
    pub attempt_service: AttemptService,
    pub stats_service: StatsService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let exam_service = ExamService::new(pool.clone());
        let attempt_service = AttemptService::new(pool.clone());
        let stats_service = StatsService::new(pool.clone());

        Self {
            pool,
            exam_service,
            attempt_service,
            stats_service,
        }
    }
}
