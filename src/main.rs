use progression::{AppState, Config, router};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if let Some(now) = config.fixed_now {
        info!("clock pinned to {now}");
    }

    let clock = config.clock();
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let base_path = config.base_path.clone();
    let app = router(AppState::new(config, clock));

    info!("listening on http://{addr} (base path {base_path})");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
