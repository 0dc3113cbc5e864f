//! HTTP handlers for alert composition and dispatch

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use shared::{
    compose_alert, compose_summary, find_crop, ActivityType, GatewayConfig, ALL_DEPARTMENTS,
};

use crate::error::AppResult;
use crate::services::{DeepLink, DispatchReport};
use crate::AppState;

/// Alert selection shared by send, preview and deep-link requests
#[derive(Debug, Deserialize)]
pub struct AlertSelection {
    /// Department id; absent or `todos` selects the country-wide summary
    pub region_id: Option<String>,
    pub crop: String,
    /// Defaults to the dashboard's current activity
    pub activity: Option<ActivityType>,
}

#[derive(Debug, Deserialize)]
pub struct DeepLinkRequest {
    #[serde(flatten)]
    pub selection: AlertSelection,
    pub phone: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub message: String,
}

/// Compose the alert text for a selection from the current dataset
async fn compose_for(state: &AppState, selection: &AlertSelection) -> AppResult<String> {
    let crop = find_crop(&selection.crop)?;
    let activity = match selection.activity {
        Some(a) => a,
        None => state.dashboard.activity().await,
    };

    match selection.region_id.as_deref() {
        Some(id) if id != ALL_DEPARTMENTS => {
            let mut record = state.dashboard.region(id).await?;
            record.reclassify(activity);
            Ok(compose_alert(&record, crop, activity))
        }
        _ => {
            let mut records = state.dashboard.snapshot(None).await.regions;
            for record in &mut records {
                record.reclassify(activity);
            }
            Ok(compose_summary(&records, crop, activity))
        }
    }
}

/// Get the stored gateway configuration
pub async fn get_gateway_config(State(state): State<AppState>) -> AppResult<Json<GatewayConfig>> {
    let config = state.notifications.gateway_config().await?;
    Ok(Json(config))
}

/// Replace the stored gateway configuration
pub async fn save_gateway_config(
    State(state): State<AppState>,
    Json(config): Json<GatewayConfig>,
) -> AppResult<Json<GatewayConfig>> {
    let saved = state.notifications.save_gateway_config(config).await?;
    Ok(Json(saved))
}

/// Send an alert to every configured destination
pub async fn send_gateway_alert(
    State(state): State<AppState>,
    Json(selection): Json<AlertSelection>,
) -> AppResult<Json<DispatchReport>> {
    let message = compose_for(&state, &selection).await?;
    let report = state.notifications.dispatch(&message).await?;
    Ok(Json(report))
}

/// Send the fixed test message
pub async fn send_gateway_test(State(state): State<AppState>) -> AppResult<Json<DispatchReport>> {
    let report = state.notifications.send_test().await?;
    Ok(Json(report))
}

/// Build a messaging deep link carrying the alert
pub async fn create_deep_link(
    State(state): State<AppState>,
    Json(request): Json<DeepLinkRequest>,
) -> AppResult<Json<DeepLink>> {
    let message = compose_for(&state, &request.selection).await?;
    let link = state.notifications.deep_link(&request.phone, message)?;
    Ok(Json(link))
}

/// Compose the alert without sending it
pub async fn preview_alert(
    State(state): State<AppState>,
    Json(selection): Json<AlertSelection>,
) -> AppResult<Json<PreviewResponse>> {
    let message = compose_for(&state, &selection).await?;
    Ok(Json(PreviewResponse { message }))
}
