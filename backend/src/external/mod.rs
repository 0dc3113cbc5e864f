//! External API integrations

pub mod weather;

pub use weather::{OfflineWeather, WeatherApiClient, WeatherSource};
