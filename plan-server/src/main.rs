use plan_server::config::ServerConfig;
use plan_server::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let app = create_router(AppState::from_config(&config));

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(
        addr = %config.addr,
        cache_ttl_secs = config.cache.ttl.as_secs(),
        cache_capacity = config.cache.max_capacity,
        plan_timeout = ?config.plan_timeout,
        "flight planner listening"
    );
    info!("POST /planner/lazy_jack/ to plan a trip, GET /health for liveness");

    axum::serve(listener, app).await
}
