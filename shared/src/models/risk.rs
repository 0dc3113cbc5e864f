//! Risk classification for agricultural activities
//!
//! Maps current weather metrics and the planned activity onto a three-level
//! traffic-light risk. Each activity has its own decision ladder; the first
//! matching rung wins and there is no weighting between metrics.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DomainError;

/// Agricultural operation being planned
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    #[default]
    #[serde(alias = "siembra")]
    Planting,
    #[serde(alias = "cosecha")]
    Harvest,
    #[serde(alias = "fumigacion", alias = "fumigación")]
    Spraying,
}

impl ActivityType {
    pub const ALL: [ActivityType; 3] = [
        ActivityType::Planting,
        ActivityType::Harvest,
        ActivityType::Spraying,
    ];

    /// Wire identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Planting => "planting",
            ActivityType::Harvest => "harvest",
            ActivityType::Spraying => "spraying",
        }
    }

    /// Lower-case Spanish name used inside alert sentences
    pub fn label_es(&self) -> &'static str {
        match self {
            ActivityType::Planting => "siembra",
            ActivityType::Harvest => "cosecha",
            ActivityType::Spraying => "fumigación",
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "planting" | "siembra" => Ok(ActivityType::Planting),
            "harvest" | "cosecha" => Ok(ActivityType::Harvest),
            "spraying" | "fumigacion" | "fumigación" => Ok(ActivityType::Spraying),
            other => Err(DomainError::UnknownActivity(other.to_string())),
        }
    }
}

/// Suitability of current weather for an activity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    /// Upper-case Spanish label used in SMS alerts
    pub fn label_es(&self) -> &'static str {
        match self {
            RiskLevel::Low => "BAJO",
            RiskLevel::Medium => "MEDIO",
            RiskLevel::High => "ALTO",
        }
    }

    /// Traffic-light call to action
    pub fn signal_es(&self) -> &'static str {
        match self {
            RiskLevel::Low => "¡ADELANTE!",
            RiskLevel::Medium => "¡PRECAUCIÓN!",
            RiskLevel::High => "¡DETENTE!",
        }
    }

    /// Legend description
    pub fn description_es(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Condiciones Óptimas",
            RiskLevel::Medium => "Riesgo Moderado",
            RiskLevel::High => "Riesgo Alto / No Recomendado",
        }
    }

    /// Marker colour (hex)
    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "#16a34a",
            RiskLevel::Medium => "#eab308",
            RiskLevel::High => "#dc2626",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            RiskLevel::Low => "✅",
            RiskLevel::Medium => "⚡",
            RiskLevel::High => "⚠️",
        }
    }

    /// Closing line of an alert for the given activity
    pub fn tone_line(&self, activity: ActivityType) -> String {
        let activity = activity.label_es();
        match self {
            RiskLevel::Low => format!("✅ Condiciones favorables para {}", activity),
            RiskLevel::Medium => format!("⚡ ATENCIÓN: Condiciones moderadas para {}", activity),
            RiskLevel::High => {
                format!("⚠️ PRECAUCIÓN: Condiciones NO favorables para {}", activity)
            }
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            other => Err(DomainError::UnknownRiskLevel(other.to_string())),
        }
    }
}

fn d(value: i64) -> Decimal {
    Decimal::from(value)
}

/// Classify weather risk for an activity.
///
/// Rainfall in mm, wind in km/h, soil moisture in percent. Total over any
/// input: out-of-range values simply fall through the comparisons.
pub fn classify_risk(
    rainfall_mm: Decimal,
    wind_kph: Decimal,
    soil_moisture_percent: Decimal,
    activity: ActivityType,
) -> RiskLevel {
    match activity {
        ActivityType::Spraying => {
            // Drift makes wind the dominant hazard
            if wind_kph > d(20) || rainfall_mm > d(5) {
                RiskLevel::High
            } else if wind_kph > d(15) || rainfall_mm > d(2) {
                RiskLevel::Medium
            } else {
                RiskLevel::Low
            }
        }
        ActivityType::Harvest => {
            if rainfall_mm > d(10) || wind_kph > d(25) {
                RiskLevel::High
            } else if rainfall_mm > d(5) || wind_kph > d(18) {
                RiskLevel::Medium
            } else {
                RiskLevel::Low
            }
        }
        ActivityType::Planting => {
            if soil_moisture_percent < d(40) || soil_moisture_percent > d(90) {
                RiskLevel::High
            } else if soil_moisture_percent < d(50)
                || soil_moisture_percent > d(85)
                || rainfall_mm < d(5)
                || rainfall_mm > d(20)
                || wind_kph > d(20)
            {
                RiskLevel::Medium
            } else {
                RiskLevel::Low
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_spraying_boundaries() {
        let zero = Decimal::ZERO;
        let moist = dec("60");
        assert_eq!(
            classify_risk(zero, dec("20"), moist, ActivityType::Spraying),
            RiskLevel::Medium
        );
        assert_eq!(
            classify_risk(zero, dec("20.01"), moist, ActivityType::Spraying),
            RiskLevel::High
        );
        assert_eq!(classify_risk(dec("5"), zero, moist, ActivityType::Spraying), RiskLevel::Medium);
        assert_eq!(
            classify_risk(dec("5.01"), zero, moist, ActivityType::Spraying),
            RiskLevel::High
        );
        assert_eq!(classify_risk(zero, dec("15"), moist, ActivityType::Spraying), RiskLevel::Low);
        assert_eq!(
            classify_risk(zero, dec("15.01"), moist, ActivityType::Spraying),
            RiskLevel::Medium
        );
        assert_eq!(classify_risk(dec("2"), zero, moist, ActivityType::Spraying), RiskLevel::Low);
        assert_eq!(
            classify_risk(dec("2.01"), zero, moist, ActivityType::Spraying),
            RiskLevel::Medium
        );
    }

    #[test]
    fn test_harvest_examples() {
        let moist = dec("60");
        assert_eq!(
            classify_risk(dec("11"), Decimal::ZERO, moist, ActivityType::Harvest),
            RiskLevel::High
        );
        assert_eq!(
            classify_risk(dec("6"), Decimal::ZERO, moist, ActivityType::Harvest),
            RiskLevel::Medium
        );
        assert_eq!(
            classify_risk(dec("1"), Decimal::ZERO, moist, ActivityType::Harvest),
            RiskLevel::Low
        );
        assert_eq!(
            classify_risk(dec("1"), dec("25.5"), moist, ActivityType::Harvest),
            RiskLevel::High
        );
        assert_eq!(
            classify_risk(dec("1"), dec("18.5"), moist, ActivityType::Harvest),
            RiskLevel::Medium
        );
    }

    #[test]
    fn test_planting_examples() {
        assert_eq!(
            classify_risk(dec("10"), dec("5"), dec("39"), ActivityType::Planting),
            RiskLevel::High
        );
        assert_eq!(
            classify_risk(dec("10"), dec("5"), dec("91"), ActivityType::Planting),
            RiskLevel::High
        );
        assert_eq!(
            classify_risk(dec("10"), dec("5"), dec("45"), ActivityType::Planting),
            RiskLevel::Medium
        );
        assert_eq!(
            classify_risk(dec("10"), dec("5"), dec("60"), ActivityType::Planting),
            RiskLevel::Low
        );
    }

    #[test]
    fn test_planting_rain_and_wind_only_reach_medium() {
        let moist = dec("60");
        assert_eq!(
            classify_risk(dec("4.9"), dec("5"), moist, ActivityType::Planting),
            RiskLevel::Medium
        );
        assert_eq!(
            classify_risk(dec("20.1"), dec("5"), moist, ActivityType::Planting),
            RiskLevel::Medium
        );
        assert_eq!(
            classify_risk(dec("10"), dec("80"), moist, ActivityType::Planting),
            RiskLevel::Medium
        );
        assert_eq!(
            classify_risk(dec("5"), dec("20"), moist, ActivityType::Planting),
            RiskLevel::Low
        );
    }

    #[test]
    fn test_negative_inputs_do_not_panic() {
        let neg = dec("-5");
        assert_eq!(classify_risk(neg, neg, neg, ActivityType::Planting), RiskLevel::High);
        assert_eq!(classify_risk(neg, neg, neg, ActivityType::Spraying), RiskLevel::Low);
    }

    #[test]
    fn test_activity_aliases() {
        assert_eq!("siembra".parse::<ActivityType>().unwrap(), ActivityType::Planting);
        assert_eq!("Cosecha".parse::<ActivityType>().unwrap(), ActivityType::Harvest);
        assert_eq!("fumigacion".parse::<ActivityType>().unwrap(), ActivityType::Spraying);
        assert_eq!("spraying".parse::<ActivityType>().unwrap(), ActivityType::Spraying);
        assert!("riego".parse::<ActivityType>().is_err());
    }

    #[test]
    fn test_activity_serde_alias() {
        let a: ActivityType = serde_json::from_str("\"fumigacion\"").unwrap();
        assert_eq!(a, ActivityType::Spraying);
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"spraying\"");
    }

    #[test]
    fn test_tone_lines_are_distinct() {
        let lines: Vec<String> = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High]
            .iter()
            .map(|r| r.tone_line(ActivityType::Harvest))
            .collect();
        assert!(lines[0].contains("favorables para cosecha"));
        assert!(lines[1].contains("moderadas"));
        assert!(lines[2].contains("NO favorables"));
    }
}
