#![allow(dead_code)]

use async_trait::async_trait;
use math_tutor_backend::database::pool::{create_pool, run_migrations};
use math_tutor_backend::error::Result;
use math_tutor_backend::services::ai_service::QuestionGenerator;
use mockall::mock;
use sqlx::SqlitePool;
use uuid::Uuid;

mock! {
    pub Generator {}

    #[async_trait]
    impl QuestionGenerator for Generator {
        async fn generate_content(&self, prompt: &str) -> Result<String>;
    }
}

pub const MODEL_REPLY: &str = r#"Here is a question for you:
```json
{
    "question": "Solve for x: 4x + 6 = 26",
    "options": [
        {"text": "x = 5", "is_correct": true},
        {"text": "x = 4", "is_correct": false},
        {"text": "x = 6", "is_correct": false},
        {"text": "x = 7", "is_correct": false}
    ],
    "solution_steps": [
        "1. Subtract 6 from both sides: 4x = 20",
        "2. Divide both sides by 4: x = 5"
    ],
    "explanation": "Isolate x by moving constants to the right and dividing by the coefficient."
}
```
Good luck!"#;

pub const PRACTICE_REPLY: &str = r#"{
    "question": "Solve for x: 2x - 4 = 6",
    "answer": "x = 5",
    "solution_steps": ["1. Add 4 to both sides: 2x = 10", "2. Divide by 2: x = 5"]
}"#;

/// Fresh SQLite file with the schema applied.
pub async fn test_pool() -> SqlitePool {
    let path = std::env::temp_dir().join(format!("math_tutor_test_{}.db", Uuid::new_v4()));
    let pool = create_pool(path.to_str().expect("temp path is not utf-8"))
        .await
        .expect("pool");
    run_migrations(&pool).await.expect("migrations");
    pool
}

pub fn generator_replying(reply: &'static str) -> MockGenerator {
    let mut generator = MockGenerator::new();
    generator
        .expect_generate_content()
        .returning(move |_| Ok(reply.to_string()));
    generator
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .expect("count rows")
}
