//! HTTP handlers for the region dashboard

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;
use shared::{ActivityType, ForecastOutlook, RegionRecord};

use crate::error::AppResult;
use crate::services::DashboardSnapshot;
use crate::AppState;

/// Default forecast horizon
const DEFAULT_FORECAST_DAYS: u8 = 3;

/// Query parameters for the region list
#[derive(Debug, Deserialize)]
pub struct RegionQuery {
    /// Department id, or `todos` for every department
    pub department: Option<String>,
}

/// Get the dashboard snapshot
pub async fn list_regions(
    State(state): State<AppState>,
    Query(query): Query<RegionQuery>,
) -> Json<DashboardSnapshot> {
    Json(state.dashboard.snapshot(query.department.as_deref()).await)
}

/// Get one department's record
pub async fn get_region(
    State(state): State<AppState>,
    Path(region_id): Path<String>,
) -> AppResult<Json<RegionRecord>> {
    let record = state.dashboard.region(&region_id).await?;
    Ok(Json(record))
}

#[derive(Debug, Default, Deserialize)]
pub struct RefreshRequest {
    pub activity: Option<ActivityType>,
}

/// Refetch weather for every department.
///
/// The body is optional; a body that is present but malformed is rejected.
pub async fn refresh_regions(
    State(state): State<AppState>,
    body: Result<Json<RefreshRequest>, JsonRejection>,
) -> AppResult<Json<DashboardSnapshot>> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => RefreshRequest::default(),
        Err(rejection) => return Err(rejection.into()),
    };
    let snapshot = state.refresh_dashboard(request.activity).await?;
    Ok(Json(snapshot))
}

#[derive(Debug, Deserialize)]
pub struct ActivityRequest {
    pub activity: ActivityType,
}

/// Change the activity; records are reclassified without refetching
pub async fn set_activity(
    State(state): State<AppState>,
    Json(request): Json<ActivityRequest>,
) -> Json<DashboardSnapshot> {
    Json(state.dashboard.set_activity(request.activity).await)
}

/// Query parameters for the forecast outlook
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub days: Option<u8>,
    pub activity: Option<ActivityType>,
}

/// Get the multi-day outlook for a department
pub async fn get_forecast(
    State(state): State<AppState>,
    Path(region_id): Path<String>,
    Query(query): Query<ForecastQuery>,
) -> AppResult<Json<ForecastOutlook>> {
    let outlook = state
        .dashboard
        .forecast(
            &region_id,
            query.days.unwrap_or(DEFAULT_FORECAST_DAYS),
            query.activity,
        )
        .await?;
    Ok(Json(outlook))
}
