//! Route definitions for the Utzk'aslem dashboard

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Region dashboard
        .nest("/regions", region_routes())
        // Crop catalog
        .route("/crops", get(handlers::list_crops))
        // Alerts
        .nest("/notifications", notification_routes())
}

/// Region dashboard routes
fn region_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_regions))
        .route("/refresh", post(handlers::refresh_regions))
        .route("/activity", put(handlers::set_activity))
        .route("/:region_id", get(handlers::get_region))
        .route("/:region_id/forecast", get(handlers::get_forecast))
}

/// Notification routes
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/gateway/config",
            get(handlers::get_gateway_config).put(handlers::save_gateway_config),
        )
        .route("/gateway/send", post(handlers::send_gateway_alert))
        .route("/gateway/test", post(handlers::send_gateway_test))
        .route("/deep-link", post(handlers::create_deep_link))
        .route("/preview", post(handlers::preview_alert))
}
