use math_tutor_backend::{
    config::Config,
    database::{
        pool::{create_pool, run_migrations},
        question_store::QuestionStore,
    },
    services::{
        ai_service::GeminiService, extraction::BraceScanExtractor,
        practice_service::PracticeService,
    },
};
use std::sync::Arc;
use tokio::io::{stdin, stdout, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let pool = create_pool(&config.database_name).await?;
    run_migrations(&pool).await?;

    let practice = PracticeService::new(
        QuestionStore::new(pool),
        Arc::new(GeminiService::from_config(&config)?),
        Arc::new(BraceScanExtractor),
        config.practice_topic,
        config.practice_difficulty,
    );

    let summary = practice.run(BufReader::new(stdin()), stdout()).await?;
    tracing::info!(?summary, "Session closed");
    Ok(())
}
