use crate::database::question_store::{self, QuestionStore};
use crate::error::{Error, Result};
use crate::models::attempt::PerformanceStats;
use chrono::Utc;

/// How a submitted answer is compared with the stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerMatch {
    #[default]
    Exact,
    Normalized,
}

impl AnswerMatch {
    pub fn matches(&self, submitted: &str, expected: &str) -> bool {
        match self {
            AnswerMatch::Exact => submitted == expected,
            AnswerMatch::Normalized => normalize_answer(submitted) == normalize_answer(expected),
        }
    }
}

/// Lowercases and drops all whitespace, which also folds `var = number` into `var=number`.
pub fn normalize_answer(answer: &str) -> String {
    answer
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionResult {
    pub is_correct: bool,
    pub explanation: String,
    pub solution_steps: Vec<String>,
    pub performance_stats: PerformanceStats,
}

#[derive(Clone)]
pub struct GradingService {
    store: QuestionStore,
    policy: AnswerMatch,
}

impl GradingService {
    pub fn new(store: QuestionStore, policy: AnswerMatch) -> Self {
        Self { store, policy }
    }

    /// Grades one submission. Lookup, attempt insert and stats recount share one write
    /// transaction, so an unknown question or a storage fault leaves no attempt row behind.
    #[tracing::instrument(skip(self, selected_answer))]
    pub async fn submit_answer(
        &self,
        question_id: i64,
        selected_answer: &str,
    ) -> Result<SubmissionResult> {
        let mut tx = self.store.begin_write().await?;

        let found = question_store::fetch_answer_key(tx.conn()?, question_id).await?;
        let Some(key) = found else {
            tx.rollback().await?;
            return Err(Error::QuestionNotFound(question_id));
        };

        let is_correct = self.policy.matches(selected_answer, &key.correct_answer);
        question_store::insert_attempt(
            tx.conn()?,
            question_id,
            selected_answer,
            is_correct,
            Utc::now(),
        )
        .await?;
        let counts = question_store::count_attempts(tx.conn()?, question_id).await?;

        tx.commit().await?;

        let performance_stats = PerformanceStats::from(counts);
        tracing::info!(
            question_id,
            is_correct,
            total_attempts = performance_stats.total_attempts,
            success_rate = performance_stats.success_rate,
            "Answer graded"
        );

        Ok(SubmissionResult {
            is_correct,
            explanation: key.explanation,
            solution_steps: key.solution_steps,
            performance_stats,
        })
    }

    pub async fn question_stats(&self, question_id: i64) -> Result<PerformanceStats> {
        if !self.store.question_exists(question_id).await? {
            return Err(Error::QuestionNotFound(question_id));
        }
        let counts = self.store.get_stats(question_id).await?;
        Ok(counts.into())
    }
}
