use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttemptCounts {
    pub total_attempts: i64,
    pub correct_attempts: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PerformanceStats {
    pub total_attempts: i64,
    pub correct_attempts: i64,
    pub success_rate: f64,
}

impl From<AttemptCounts> for PerformanceStats {
    fn from(counts: AttemptCounts) -> Self {
        let success_rate = if counts.total_attempts > 0 {
            let rate = counts.correct_attempts as f64 / counts.total_attempts as f64 * 100.0;
            (rate * 100.0).round() / 100.0
        } else {
            0.0
        };

        Self {
            total_attempts: counts.total_attempts,
            correct_attempts: counts.correct_attempts,
            success_rate,
        }
    }
}
