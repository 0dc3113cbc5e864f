//! Utzk'aslem - Backend Server
//!
//! Weather-driven planting, harvest and spraying advice for Guatemalan
//! farmers, with SMS and messaging alerts.

use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utzkaslem_backend::{create_app, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "utz_server=debug,utzkaslem_backend=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Utzk'aslem Server");
    tracing::info!("Environment: {}", config.environment);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let refresh_on_startup = config.dashboard.refresh_on_startup;

    // Create application state
    let state = AppState::from_config(config)?;

    if refresh_on_startup {
        let startup_state = state.clone();
        tokio::spawn(async move {
            match startup_state.refresh_dashboard(None).await {
                Ok(snapshot) => tracing::info!(
                    "Initial refresh loaded {} departments",
                    snapshot.regions.len()
                ),
                Err(e) => tracing::warn!("Initial refresh did not commit: {}", e),
            }
        });
    }

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
