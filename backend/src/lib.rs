//! Utzk'aslem - Agricultural advisory dashboard backend
//!
//! Serves per-department weather risk for Guatemala's 22 departments and
//! dispatches alerts over an SMS gateway or messaging deep links.

use std::sync::Arc;

use axum::{routing::get, Router};
use shared::ActivityType;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

use error::AppResult;
use external::{OfflineWeather, WeatherApiClient, WeatherSource};
use services::{
    DashboardService, DashboardSnapshot, FileGatewayConfigStore, GatewayClient,
    GatewayConfigStore, NotificationService,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dashboard: DashboardService,
    pub notifications: NotificationService,
}

impl AppState {
    /// Wire the production weather source and file-backed gateway store
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let source: Arc<dyn WeatherSource> = if config.weather.is_live() {
            Arc::new(WeatherApiClient::new(&config.weather)?)
        } else {
            tracing::warn!("Weather API key not configured, using simulated data");
            Arc::new(OfflineWeather)
        };
        let store = Arc::new(FileGatewayConfigStore::new(config.gateway.config_path.clone()));

        Self::new(config, source, store)
    }

    /// Wire explicit collaborators
    pub fn new(
        config: Config,
        source: Arc<dyn WeatherSource>,
        store: Arc<dyn GatewayConfigStore>,
    ) -> anyhow::Result<Self> {
        let gateway = GatewayClient::new(&config.gateway)?;
        let notifications = NotificationService::new(store, gateway, &config.deep_link);
        let dashboard = DashboardService::new(source, config.dashboard.default_activity);

        Ok(Self {
            config: Arc::new(config),
            dashboard,
            notifications,
        })
    }

    /// Full refresh followed by the automatic summary dispatch, if enabled
    pub async fn refresh_dashboard(
        &self,
        activity: Option<ActivityType>,
    ) -> AppResult<DashboardSnapshot> {
        let snapshot = self.dashboard.refresh(activity).await?;
        self.notifications
            .spawn_auto_send(snapshot.regions.clone(), snapshot.activity);
        Ok(snapshot)
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Utzk'aslem Agricultural Advisory API v1"
}
