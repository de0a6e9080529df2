use tracing_subscriber::EnvFilter;

use weam_editor::{config, router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up API_BASIC_AUTH_*, SESSION_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::config().clone();
    tracing::info!("Starting Weam editor gate in {:?} mode", config.environment);

    if config.session.secret.is_empty() {
        tracing::warn!("SESSION_SECRET is not set; every request will be treated as having no session");
    }
    if config.upstream.basic_auth_username.is_empty() {
        tracing::warn!("API_BASIC_AUTH_USERNAME is not set; access checks will be sent without a user");
    }

    let bind_addr = format!("{}:{}", config.server.bind_host, config.server.port);
    let app = router(AppState::from_config(config)?);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Weam editor gate listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
