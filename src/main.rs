use std::net::SocketAddr;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use celita_backend::config::Config;
use celita_backend::routes;
use celita_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("celita_backend=debug,tower_http=debug")),
        )
        .init();

    let (config, loaded_path) = Config::load_first(&Config::candidate_paths())?;
    info!("Loaded configuration from: {}", loaded_path.display());

    let app_state = AppState::new(config.clone()).await?;
    let app = routes::create_app(app_state);

    let addr: SocketAddr =
        format!("{}:{}", config.server_config.host, config.server_config.port).parse()?;
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
