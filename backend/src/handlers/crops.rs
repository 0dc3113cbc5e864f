//! HTTP handlers for the crop catalog

use axum::{extract::Query, Json};
use serde::Deserialize;
use shared::{available_crops, crops_for_departments, Crop};

/// Query parameters for the crop list
#[derive(Debug, Deserialize)]
pub struct CropQuery {
    /// Department display name, e.g. "Petén"
    pub department: Option<String>,
    /// Comma-separated department names; takes precedence over `department`
    pub departments: Option<String>,
}

/// List crops, narrowed to one or more departments when given
pub async fn list_crops(Query(query): Query<CropQuery>) -> Json<Vec<Crop>> {
    let crops = match query.departments.as_deref() {
        Some(list) => {
            let names: Vec<&str> = list
                .split(',')
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .collect();
            crops_for_departments(&names)
        }
        None => available_crops(query.department.as_deref().filter(|d| !d.is_empty())),
    };
    Json(crops.into_iter().copied().collect())
}
