use math_tutor_backend::{
    config::Config,
    database::pool::{create_pool, run_migrations},
    middleware::cors::cors_layer,
    routes,
    services::ai_service::GeminiService,
    AppState,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let pool = create_pool(&config.database_name).await?;
    run_migrations(&pool).await?;
    info!("Database ready at {}", config.database_name);

    let generator = Arc::new(GeminiService::from_config(&config)?);
    let app_state = AppState::new(pool, generator);

    let app = routes::app_router(app_state, cors_layer(&config.cors_allowed_origin)?);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
