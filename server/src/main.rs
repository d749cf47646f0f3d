mod config;
mod db;
mod rate_limit;
mod routes;
mod services;
mod state;

use std::time::Duration;

use tracing_subscriber::EnvFilter;

const MAINTENANCE_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "server exited");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let config = config::AppConfig::from_env().map_err(|e| e.to_string())?;
    let port = config.port;

    let pool = db::init_pool(&config.database_url)
        .await
        .map_err(|e| format!("database init failed: {e}"))?;

    if config.resend.is_none() {
        tracing::warn!("RESEND_API_KEY/RESEND_FROM not set; access codes will not be emailed");
    }

    let state = state::AppState::new(pool, config);
    spawn_maintenance(state.clone());

    let app = routes::leptos_app(state)?;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .map_err(|e| format!("failed to bind: {e}"))?;

    tracing::info!(%port, "inmogestion listening");
    axum::serve(listener, app)
        .await
        .map_err(|e| format!("server failed: {e}"))
}

/// Periodically drop idle rate-limit entries and expired sessions.
fn spawn_maintenance(state: state::AppState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(MAINTENANCE_INTERVAL);
        loop {
            interval.tick().await;
            state.code_limiter.sweep();
            match services::session::purge_expired(&state.pool).await {
                Ok(0) => {}
                Ok(purged) => tracing::info!(purged, "expired sessions removed"),
                Err(e) => tracing::error!(error = %e, "session purge failed"),
            }
        }
    })
}
