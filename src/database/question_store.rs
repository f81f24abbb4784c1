use crate::error::{Error, Result};
use crate::models::attempt::AttemptCounts;
use crate::models::question::{AnswerKey, AnswerOption, Difficulty, MathTopic};
use chrono::{DateTime, Utc};
use sqlx::pool::PoolConnection;
use sqlx::types::Json;
use sqlx::{Sqlite, SqliteConnection, SqlitePool};

#[derive(Debug, Clone, Copy)]
pub struct NewQuestion<'a> {
    pub topic: MathTopic,
    pub difficulty: Difficulty,
    pub question_text: &'a str,
    pub correct_answer: &'a str,
    pub options: &'a [AnswerOption],
    pub solution_steps: &'a [String],
    pub explanation: &'a str,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPracticeAttempt<'a> {
    pub question_text: &'a str,
    pub student_answer: &'a str,
    pub correct_answer: &'a str,
    pub is_correct: bool,
    pub attempt_date: DateTime<Utc>,
}

/// Durable store for generated questions and the attempts graded against them.
///
/// Callers that need a read and a write to commit together open a
/// [`WriteTransaction`] and use the connection-level functions of this module.
#[derive(Clone)]
pub struct QuestionStore {
    pool: SqlitePool,
}

impl QuestionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a transaction with `BEGIN IMMEDIATE`. The write lock is taken before the first
    /// read, so concurrent writers queue on the busy timeout instead of failing on upgrade.
    pub async fn begin_write(&self) -> Result<WriteTransaction> {
        let mut tx = WriteTransaction {
            conn: Some(self.pool.acquire().await?),
        };
        if let Err(e) = tx.execute("BEGIN IMMEDIATE").await {
            tx.conn.take();
            return Err(e);
        }
        Ok(tx)
    }

    pub async fn create_question(&self, question: NewQuestion<'_>) -> Result<i64> {
        let mut tx = self.pool.begin().await?;
        let id = sqlx::query(
            r#"
            INSERT INTO questions
                (topic, difficulty, question_text, correct_answer, options, solution_steps, explanation, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(question.topic.as_str())
        .bind(question.difficulty.as_str())
        .bind(question.question_text)
        .bind(question.correct_answer)
        .bind(Json(question.options))
        .bind(Json(question.solution_steps))
        .bind(question.explanation)
        .bind(question.created_at)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();
        tx.commit().await?;

        tracing::debug!(question_id = id, topic = %question.topic, "Question stored");
        Ok(id)
    }

    pub async fn get_question(&self, question_id: i64) -> Result<Option<AnswerKey>> {
        let mut conn = self.pool.acquire().await?;
        fetch_answer_key(&mut conn, question_id).await
    }

    pub async fn question_exists(&self, question_id: i64) -> Result<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM questions WHERE id = ?")
            .bind(question_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }

    pub async fn record_attempt(
        &self,
        question_id: i64,
        selected_answer: &str,
        is_correct: bool,
        attempt_date: DateTime<Utc>,
    ) -> Result<i64> {
        let mut tx = self.pool.begin().await?;
        let id = insert_attempt(&mut tx, question_id, selected_answer, is_correct, attempt_date)
            .await?;
        tx.commit().await?;
        Ok(id)
    }

    pub async fn get_stats(&self, question_id: i64) -> Result<AttemptCounts> {
        let mut conn = self.pool.acquire().await?;
        count_attempts(&mut conn, question_id).await
    }

    pub async fn record_practice_attempt(&self, attempt: NewPracticeAttempt<'_>) -> Result<i64> {
        let id = sqlx::query(
            r#"
            INSERT INTO practice_attempts
                (question_text, student_answer, correct_answer, is_correct, attempt_date)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(attempt.question_text)
        .bind(attempt.student_answer)
        .bind(attempt.correct_answer)
        .bind(attempt.is_correct)
        .bind(attempt.attempt_date)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();
        Ok(id)
    }
}

pub struct WriteTransaction {
    conn: Option<PoolConnection<Sqlite>>,
}

impl WriteTransaction {
    pub fn conn(&mut self) -> Result<&mut SqliteConnection> {
        self.conn
            .as_deref_mut()
            .ok_or_else(|| Error::Internal("transaction already finished".to_string()))
    }

    pub async fn commit(self) -> Result<()> {
        self.finish("COMMIT").await
    }

    pub async fn rollback(self) -> Result<()> {
        self.finish("ROLLBACK").await
    }

    async fn execute(&mut self, statement: &'static str) -> Result<()> {
        sqlx::query(statement).execute(self.conn()?).await?;
        Ok(())
    }

    async fn finish(mut self, statement: &'static str) -> Result<()> {
        self.execute(statement).await?;
        // Closed cleanly, so the connection can go back to the pool.
        self.conn.take();
        Ok(())
    }
}

impl Drop for WriteTransaction {
    fn drop(&mut self) {
        // Still inside BEGIN IMMEDIATE: close the connection rather than pool it.
        if let Some(conn) = self.conn.take() {
            tracing::warn!("Write transaction dropped before commit, discarding connection");
            drop(conn.detach());
        }
    }
}

pub async fn fetch_answer_key(
    conn: &mut SqliteConnection,
    question_id: i64,
) -> Result<Option<AnswerKey>> {
    let row: Option<(String, Json<Vec<String>>, String)> = sqlx::query_as(
        r#"SELECT correct_answer, solution_steps, explanation FROM questions WHERE id = ?"#,
    )
    .bind(question_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row.map(|(correct_answer, solution_steps, explanation)| AnswerKey {
        correct_answer,
        solution_steps: solution_steps.0,
        explanation,
    }))
}

pub async fn insert_attempt(
    conn: &mut SqliteConnection,
    question_id: i64,
    selected_answer: &str,
    is_correct: bool,
    attempt_date: DateTime<Utc>,
) -> Result<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO student_attempts (question_id, selected_answer, is_correct, attempt_date)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(question_id)
    .bind(selected_answer)
    .bind(is_correct)
    .bind(attempt_date)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();
    Ok(id)
}

pub async fn count_attempts(conn: &mut SqliteConnection, question_id: i64) -> Result<AttemptCounts> {
    let (total_attempts, correct_attempts): (i64, i64) = sqlx::query_as(
        r#"
        SELECT
            COUNT(*),
            COALESCE(SUM(CASE WHEN is_correct THEN 1 ELSE 0 END), 0)
        FROM student_attempts
        WHERE question_id = ?
        "#,
    )
    .bind(question_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(AttemptCounts {
        total_attempts,
        correct_attempts,
    })
}
