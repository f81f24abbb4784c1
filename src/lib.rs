pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use crate::database::question_store::QuestionStore;
use crate::services::{
    ai_service::QuestionGenerator,
    extraction::{BraceScanExtractor, ResponseExtractor},
    grading_service::{AnswerMatch, GradingService},
    question_service::QuestionService,
};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub question_service: QuestionService,
    pub grading_service: GradingService,
}

impl AppState {
    /// Wires the HTTP services around an injected storage pool and generation handle.
    /// Submissions are graded by exact match against the stored option text.
    pub fn new(pool: SqlitePool, generator: Arc<dyn QuestionGenerator>) -> Self {
        let store = QuestionStore::new(pool.clone());
        let extractor: Arc<dyn ResponseExtractor> = Arc::new(BraceScanExtractor);

        let question_service = QuestionService::new(store.clone(), generator, extractor);
        let grading_service = GradingService::new(store, AnswerMatch::Exact);

        Self {
            pool,
            question_service,
            grading_service,
        }
    }
}
