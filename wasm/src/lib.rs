//! WebAssembly module for the Utzk'aslem dashboard
//!
//! Provides client-side computation for:
//! - Risk classification and reclassification on activity change
//! - Crop filtering by department
//! - Alert message composition
//! - Messaging deep links
//! - Map anchor projection

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&JsValue::from_str("Utzk'aslem WASM module loaded"));
}

fn warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

/// Parse an activity name, falling back to planting for unknown input
fn parse_activity(activity: &str) -> ActivityType {
    activity.parse().unwrap_or_else(|e| {
        warn(&format!("{}; using planting", e));
        ActivityType::Planting
    })
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

fn to_js<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

// ============================================================================
// Risk
// ============================================================================

/// Classify weather metrics for an activity; returns `low`, `medium` or `high`
#[wasm_bindgen]
pub fn classify(
    rainfall_mm: f64,
    wind_kph: f64,
    soil_moisture_percent: f64,
    activity: &str,
) -> String {
    classify_risk(
        to_decimal(rainfall_mm),
        to_decimal(wind_kph),
        to_decimal(soil_moisture_percent),
        parse_activity(activity),
    )
    .as_str()
    .to_string()
}

#[derive(Serialize)]
struct RiskStyle {
    level: RiskLevel,
    label: &'static str,
    signal: &'static str,
    description: &'static str,
    color: &'static str,
    icon: &'static str,
}

/// Display attributes for a risk level as JSON
#[wasm_bindgen]
pub fn risk_style(risk: &str) -> Result<String, JsValue> {
    let level: RiskLevel = risk
        .parse()
        .map_err(|e: shared::DomainError| JsValue::from_str(&e.to_string()))?;
    to_js(&RiskStyle {
        level,
        label: level.label_es(),
        signal: level.signal_es(),
        description: level.description_es(),
        color: level.color(),
        icon: level.icon(),
    })
}

fn reclassify_json(
    records_json: &str,
    activity: ActivityType,
) -> Result<Vec<RegionRecord>, String> {
    let mut records: Vec<RegionRecord> =
        serde_json::from_str(records_json).map_err(|e| format!("Invalid records JSON: {}", e))?;
    for record in &mut records {
        record.reclassify(activity);
    }
    Ok(records)
}

/// Reclassify a JSON array of region records for a new activity
#[wasm_bindgen]
pub fn reclassify_regions(records_json: &str, activity: &str) -> Result<String, JsValue> {
    let records = reclassify_json(records_json, parse_activity(activity))
        .map_err(|e| JsValue::from_str(&e))?;
    to_js(&records)
}

// ============================================================================
// Crops
// ============================================================================

/// Crops for a department (empty name = whole catalog) as JSON
#[wasm_bindgen]
pub fn crops_for_department(department_name: &str) -> Result<String, JsValue> {
    let department = Some(department_name).filter(|d| !d.is_empty());
    to_js(&available_crops(department))
}

/// Union of crops for a comma-separated list of department names as JSON
#[wasm_bindgen]
pub fn crops_for_department_list(department_names: &str) -> Result<String, JsValue> {
    to_js(&crops_for_departments(&split_names(department_names)))
}

fn split_names(list: &str) -> Vec<&str> {
    list.split(',').map(str::trim).filter(|n| !n.is_empty()).collect()
}

/// Keep a crop selection valid for a department; returns the crop id
#[wasm_bindgen]
pub fn resolve_crop_selection(crop_id: &str, department_name: &str) -> String {
    let department = Some(department_name).filter(|d| !d.is_empty());
    resolve_crop(crop_id, department).id.to_string()
}

// ============================================================================
// Alerts
// ============================================================================

fn compose_alert_json(
    record_json: &str,
    crop_id: &str,
    activity: ActivityType,
) -> Result<String, String> {
    let mut record: RegionRecord =
        serde_json::from_str(record_json).map_err(|e| format!("Invalid record JSON: {}", e))?;
    let crop = find_crop(crop_id).map_err(|e| e.to_string())?;
    record.reclassify(activity);
    Ok(compose_alert(&record, crop, activity))
}

/// Compose the alert text for one region record (JSON)
#[wasm_bindgen]
pub fn compose_alert_message(
    record_json: &str,
    crop_id: &str,
    activity: &str,
) -> Result<String, JsValue> {
    compose_alert_json(record_json, crop_id, parse_activity(activity))
        .map_err(|e| JsValue::from_str(&e))
}

/// Compose the country-wide summary for a JSON array of records
#[wasm_bindgen]
pub fn compose_summary_message(
    records_json: &str,
    crop_id: &str,
    activity: &str,
) -> Result<String, JsValue> {
    let activity = parse_activity(activity);
    let records = reclassify_json(records_json, activity).map_err(|e| JsValue::from_str(&e))?;
    let crop = find_crop(crop_id).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(compose_summary(&records, crop, activity))
}

fn build_link(
    base_url: &str,
    phone: &str,
    message: &str,
    encode: impl Fn(&str) -> String,
) -> Result<String, String> {
    validate_phone_number(phone).map_err(str::to_string)?;
    Ok(format!(
        "{}?phone={}&text={}",
        base_url,
        normalize_phone_number(phone),
        encode(message)
    ))
}

/// Messaging deep link for a destination and message
#[wasm_bindgen]
pub fn whatsapp_link(base_url: &str, phone: &str, message: &str) -> Result<String, JsValue> {
    build_link(base_url, phone, message, |m| {
        String::from(js_sys::encode_uri_component(m))
    })
    .map_err(|e| JsValue::from_str(&e))
}

// ============================================================================
// Map
// ============================================================================

/// Project a map anchor (percent of frame) to `[latitude, longitude]`
#[wasm_bindgen]
pub fn anchor_to_lat_lng(x: f64, y: f64) -> Vec<f64> {
    let coords = MapAnchor::new(x, y).to_lat_lng();
    vec![coords.latitude, coords.longitude]
}
