//! Weather data models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::risk::{classify_risk, ActivityType, RiskLevel};

/// Current conditions for one department
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherObservation {
    pub temperature_celsius: Decimal,
    pub precipitation_mm: Decimal,
    pub wind_kph: Decimal,
    pub humidity_percent: Decimal,
    pub condition: String,
}

/// Where a set of weather metrics came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Observed by the live weather provider
    Live,
    /// Generated because no live provider is configured
    Simulated,
    /// Generated because the live provider could not answer for this department
    Fallback,
}

impl DataSource {
    pub fn is_synthetic(&self) -> bool {
        !matches!(self, DataSource::Live)
    }
}

/// Risk for a set of metrics, taking provenance into account.
///
/// Fallback data is never trusted enough to clear or stop an activity, so it
/// is pinned to [`RiskLevel::Medium`].
pub fn assess_risk(
    rainfall_mm: Decimal,
    wind_kph: Decimal,
    soil_moisture_percent: Decimal,
    source: DataSource,
    activity: ActivityType,
) -> RiskLevel {
    match source {
        DataSource::Live | DataSource::Simulated => {
            classify_risk(rainfall_mm, wind_kph, soil_moisture_percent, activity)
        }
        DataSource::Fallback => RiskLevel::Medium,
    }
}

/// Aggregated daily forecast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub avg_temperature_celsius: Decimal,
    pub total_precipitation_mm: Decimal,
    pub avg_humidity_percent: Decimal,
    pub max_wind_kph: Decimal,
    pub condition: String,
}

/// A forecast day with its classified risk
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailyOutlook {
    #[serde(flatten)]
    pub forecast: DailyForecast,
    pub risk: RiskLevel,
}

/// Multi-day outlook for one department
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ForecastOutlook {
    pub department: String,
    pub activity: ActivityType,
    pub source: DataSource,
    pub days: Vec<DailyOutlook>,
}

impl ForecastOutlook {
    /// Classify every forecast day for the activity.
    ///
    /// Total precipitation, max wind and average humidity stand in for the
    /// current-conditions metrics; provenance applies as for region records.
    pub fn classify(
        department: impl Into<String>,
        forecasts: Vec<DailyForecast>,
        source: DataSource,
        activity: ActivityType,
    ) -> Self {
        let days = forecasts
            .into_iter()
            .map(|forecast| {
                let risk = assess_risk(
                    forecast.total_precipitation_mm,
                    forecast.max_wind_kph,
                    forecast.avg_humidity_percent,
                    source,
                    activity,
                );
                DailyOutlook { forecast, risk }
            })
            .collect();

        Self {
            department: department.into(),
            activity,
            source,
            days,
        }
    }
}
