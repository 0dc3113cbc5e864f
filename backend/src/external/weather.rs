//! Weather sources for department observations and forecasts
//!
//! Integrates with WeatherAPI.com for current conditions and forecasts, and
//! generates synthetic readings when the provider is not configured or cannot
//! answer.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use reqwest::Client;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{department_coordinates, DailyForecast, GpsCoordinates, WeatherObservation};

use crate::config::WeatherConfig;

/// Forecast horizon accepted by the provider
pub const MAX_FORECAST_DAYS: u8 = 7;

/// Condition text attached to synthetic readings
pub const SYNTHETIC_CONDITION: &str = "Parcialmente nublado";

/// A provider of weather data keyed by department name.
///
/// Failures never surface as errors: an unknown department, a transport
/// failure, a non-success status or a malformed body all yield `None`.
#[axum::async_trait]
pub trait WeatherSource: Send + Sync {
    /// Whether this source talks to a real provider
    fn is_live(&self) -> bool;

    /// Current conditions for a department
    async fn fetch_current(&self, department_name: &str) -> Option<WeatherObservation>;

    /// Daily forecast for a department, `days` in `1..=7`
    async fn fetch_forecast(&self, department_name: &str, days: u8) -> Option<Vec<DailyForecast>>;
}

/// Source used when no provider key is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineWeather;

#[axum::async_trait]
impl WeatherSource for OfflineWeather {
    fn is_live(&self) -> bool {
        false
    }

    async fn fetch_current(&self, _department_name: &str) -> Option<WeatherObservation> {
        None
    }

    async fn fetch_forecast(
        &self,
        _department_name: &str,
        _days: u8,
    ) -> Option<Vec<DailyForecast>> {
        None
    }
}

/// WeatherAPI.com client
#[derive(Clone)]
pub struct WeatherApiClient {
    client: Client,
    api_key: String,
    base_url: String,
    lang: String,
}

/// WeatherAPI.com current-conditions response
#[derive(Debug, Deserialize)]
struct WapiCurrentResponse {
    current: WapiCurrent,
}

#[derive(Debug, Deserialize)]
struct WapiCurrent {
    temp_c: f64,
    condition: WapiCondition,
    wind_kph: f64,
    precip_mm: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct WapiCondition {
    text: String,
}

/// WeatherAPI.com forecast response
#[derive(Debug, Deserialize)]
struct WapiForecastResponse {
    forecast: WapiForecast,
}

#[derive(Debug, Deserialize)]
struct WapiForecast {
    forecastday: Vec<WapiForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WapiForecastDay {
    date: NaiveDate,
    day: WapiDay,
}

#[derive(Debug, Deserialize)]
struct WapiDay {
    avgtemp_c: f64,
    maxwind_kph: f64,
    totalprecip_mm: f64,
    avghumidity: f64,
    condition: WapiCondition,
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

impl WeatherApiClient {
    /// Create a client from configuration
    pub fn new(config: &WeatherConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.api_endpoint.trim_end_matches('/').to_string(),
            lang: config.lang.clone(),
        })
    }

    /// Create a client against a custom base URL (for testing)
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            lang: "es".to_string(),
        }
    }

    fn query(&self, coords: GpsCoordinates) -> Vec<(&'static str, String)> {
        vec![
            ("key", self.api_key.clone()),
            ("q", format!("{},{}", coords.latitude, coords.longitude)),
            ("lang", self.lang.clone()),
        ]
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, String> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| format!("Weather API request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("Weather API error: {}", response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| format!("Failed to parse weather response: {}", e))
    }

    fn convert_current(data: WapiCurrentResponse) -> WeatherObservation {
        WeatherObservation {
            temperature_celsius: to_decimal(data.current.temp_c),
            precipitation_mm: to_decimal(data.current.precip_mm),
            wind_kph: to_decimal(data.current.wind_kph),
            humidity_percent: to_decimal(data.current.humidity),
            condition: data.current.condition.text,
        }
    }

    fn convert_forecast(data: WapiForecastResponse) -> Vec<DailyForecast> {
        data.forecast
            .forecastday
            .into_iter()
            .map(|d| DailyForecast {
                date: d.date,
                avg_temperature_celsius: to_decimal(d.day.avgtemp_c),
                total_precipitation_mm: to_decimal(d.day.totalprecip_mm),
                avg_humidity_percent: to_decimal(d.day.avghumidity),
                max_wind_kph: to_decimal(d.day.maxwind_kph),
                condition: d.day.condition.text,
            })
            .collect()
    }
}

#[axum::async_trait]
impl WeatherSource for WeatherApiClient {
    fn is_live(&self) -> bool {
        true
    }

    async fn fetch_current(&self, department_name: &str) -> Option<WeatherObservation> {
        let Some(coords) = department_coordinates(department_name) else {
            tracing::warn!("No coordinates for department {}", department_name);
            return None;
        };

        let url = format!("{}/current.json", self.base_url);
        match self.get_json::<WapiCurrentResponse>(&url, &self.query(coords)).await {
            Ok(data) => Some(Self::convert_current(data)),
            Err(e) => {
                tracing::warn!("Current weather for {} unavailable: {}", department_name, e);
                None
            }
        }
    }

    async fn fetch_forecast(&self, department_name: &str, days: u8) -> Option<Vec<DailyForecast>> {
        let coords = department_coordinates(department_name)?;
        let days = days.clamp(1, MAX_FORECAST_DAYS);

        let url = format!("{}/forecast.json", self.base_url);
        let mut query = self.query(coords);
        query.push(("days", days.to_string()));

        match self.get_json::<WapiForecastResponse>(&url, &query).await {
            Ok(data) => Some(Self::convert_forecast(data)),
            Err(e) => {
                tracing::warn!("Forecast for {} unavailable: {}", department_name, e);
                None
            }
        }
    }
}

// ============================================================================
// Synthetic readings
// ============================================================================

/// Synthetic current conditions within plausible Guatemalan ranges:
/// temperature 20-30 °C, precipitation 0-15 mm, wind 8-23 km/h (one decimal),
/// humidity 50-90 % (whole number).
pub fn synthetic_observation<R: Rng + ?Sized>(rng: &mut R) -> WeatherObservation {
    WeatherObservation {
        temperature_celsius: Decimal::new(rng.gen_range(200i64..=300), 1),
        precipitation_mm: Decimal::new(rng.gen_range(0i64..=150), 1),
        wind_kph: Decimal::new(rng.gen_range(80i64..=230), 1),
        humidity_percent: Decimal::from(rng.gen_range(50i64..=90)),
        condition: SYNTHETIC_CONDITION.to_string(),
    }
}

/// Synthetic daily forecast starting at `start`
pub fn synthetic_forecast<R: Rng + ?Sized>(
    rng: &mut R,
    start: NaiveDate,
    days: u8,
) -> Vec<DailyForecast> {
    (0..days.clamp(1, MAX_FORECAST_DAYS))
        .map(|offset| {
            let reading = synthetic_observation(rng);
            DailyForecast {
                date: start + Duration::days(i64::from(offset)),
                avg_temperature_celsius: reading.temperature_celsius,
                total_precipitation_mm: reading.precipitation_mm,
                avg_humidity_percent: reading.humidity_percent,
                max_wind_kph: reading.wind_kph,
                condition: reading.condition,
            }
        })
        .collect()
}
