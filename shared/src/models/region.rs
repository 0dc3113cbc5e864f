//! Department directory and per-department region records

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::risk::{ActivityType, RiskLevel};
use super::weather::{assess_risk, DataSource, WeatherObservation};
use crate::error::DomainError;
use crate::types::{GpsCoordinates, MapAnchor};

/// Identifier used by the dashboard to mean "no department filter"
pub const ALL_DEPARTMENTS: &str = "todos";

/// Static identity of one of Guatemala's 22 departments
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Department {
    pub id: &'static str,
    pub name: &'static str,
    /// Representative sub-locality (aldea or municipality)
    pub aldea: &'static str,
    pub anchor: MapAnchor,
    /// Coordinates used for weather lookups
    pub coordinates: GpsCoordinates,
}

const fn dept(
    id: &'static str,
    name: &'static str,
    aldea: &'static str,
    x: f64,
    y: f64,
    lat: f64,
    lon: f64,
) -> Department {
    Department {
        id,
        name,
        aldea,
        anchor: MapAnchor::new(x, y),
        coordinates: GpsCoordinates::new(lat, lon),
    }
}

/// All departments in declaration order (north, west, centre, east, metro, south)
pub static DEPARTMENTS: [Department; 22] = [
    dept("1", "Petén", "San Benito", 52.0, 20.0, 16.9167, -89.8833),
    dept("2", "Huehuetenango", "Todos Santos", 32.0, 55.0, 15.3197, -91.4722),
    dept("11", "Quetzaltenango", "Xela", 32.0, 71.0, 14.8333, -91.5167),
    dept("21", "Totonicapán", "Totonicapán", 35.0, 67.0, 14.9167, -91.3611),
    dept("19", "Sololá", "Panajachel", 37.0, 73.0, 14.7719, -91.1897),
    dept("3", "Quiché", "Chichicastenango", 41.0, 58.0, 15.0333, -91.1500),
    dept("4", "Alta Verapaz", "Cobán", 53.0, 55.0, 15.4747, -90.3106),
    dept("15", "Baja Verapaz", "Salamá", 48.0, 66.0, 15.1167, -90.3167),
    dept("5", "Izabal", "Puerto Barrios", 65.0, 55.0, 15.7308, -88.5978),
    dept("22", "Zacapa", "Estanzuela", 59.0, 67.0, 14.9728, -89.5283),
    dept("16", "Chiquimula", "Esquipulas", 61.0, 75.0, 14.8000, -89.5333),
    dept("6", "Guatemala", "Villa Nueva", 47.0, 75.0, 14.6349, -90.5069),
    dept("7", "Sacatepéquez", "Antigua", 43.0, 77.0, 14.5583, -90.7347),
    dept("8", "Chimaltenango", "Patzún", 41.0, 72.0, 14.6611, -90.8194),
    dept("17", "El Progreso", "Guastatoya", 52.0, 69.0, 14.8511, -90.0594),
    dept("13", "Jalapa", "Mataquescuintla", 54.0, 75.0, 14.6350, -89.9889),
    dept("9", "Escuintla", "Tiquisate", 40.0, 84.0, 14.3050, -90.7850),
    dept("12", "Retalhuleu", "Champerico", 29.0, 80.0, 14.5375, -91.6736),
    dept("20", "Suchitepéquez", "Mazatenango", 34.0, 79.0, 14.4167, -91.4167),
    dept("10", "San Marcos", "San Pedro", 28.0, 65.0, 14.9636, -91.7994),
    dept("14", "Jutiapa", "El Progreso", 55.0, 83.0, 14.2914, -89.8956),
    dept("18", "Santa Rosa", "Cuilapa", 49.0, 85.0, 14.3833, -90.3000),
];

/// Look up a department by its stable identifier
pub fn find_department(id: &str) -> Result<&'static Department, DomainError> {
    DEPARTMENTS
        .iter()
        .find(|d| d.id == id)
        .ok_or_else(|| DomainError::UnknownDepartment(id.to_string()))
}

/// Look up a department by display name (exact match, accents included)
pub fn find_department_by_name(name: &str) -> Option<&'static Department> {
    DEPARTMENTS.iter().find(|d| d.name == name)
}

/// Coordinates for weather lookups by department name
pub fn department_coordinates(name: &str) -> Option<GpsCoordinates> {
    find_department_by_name(name).map(|d| d.coordinates)
}

/// Weather and risk state for one department.
///
/// Fields are read-only: the risk is always derived from the stored metrics,
/// their provenance and an activity, so metrics and risk cannot drift apart.
/// A deserialized record keeps whatever risk it was sent with until
/// [`RegionRecord::reclassify`] is called.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionRecord {
    id: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    aldea: Option<String>,
    position: MapAnchor,
    rainfall_mm: Decimal,
    wind_kph: Decimal,
    soil_moisture_percent: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature_celsius: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    condition: Option<String>,
    source: DataSource,
    risk: RiskLevel,
}

impl RegionRecord {
    /// Build a record from an observation, classifying it for `activity`
    pub fn from_observation(
        department: &Department,
        observation: WeatherObservation,
        source: DataSource,
        activity: ActivityType,
    ) -> Self {
        let risk = assess_risk(
            observation.precipitation_mm,
            observation.wind_kph,
            observation.humidity_percent,
            source,
            activity,
        );

        Self {
            id: department.id.to_string(),
            name: department.name.to_string(),
            aldea: Some(department.aldea.to_string()).filter(|a| !a.is_empty()),
            position: department.anchor,
            rainfall_mm: observation.precipitation_mm,
            wind_kph: observation.wind_kph,
            soil_moisture_percent: observation.humidity_percent,
            temperature_celsius: Some(observation.temperature_celsius),
            condition: Some(observation.condition).filter(|c| !c.is_empty()),
            source,
            risk,
        }
    }

    /// Recompute the risk from the stored metrics; never touches the metrics
    pub fn reclassify(&mut self, activity: ActivityType) {
        self.risk = assess_risk(
            self.rainfall_mm,
            self.wind_kph,
            self.soil_moisture_percent,
            self.source,
            activity,
        );
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aldea(&self) -> Option<&str> {
        self.aldea.as_deref()
    }

    pub fn position(&self) -> MapAnchor {
        self.position
    }

    pub fn rainfall_mm(&self) -> Decimal {
        self.rainfall_mm
    }

    pub fn wind_kph(&self) -> Decimal {
        self.wind_kph
    }

    pub fn soil_moisture_percent(&self) -> Decimal {
        self.soil_moisture_percent
    }

    pub fn temperature_celsius(&self) -> Option<Decimal> {
        self.temperature_celsius
    }

    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    pub fn source(&self) -> DataSource {
        self.source
    }

    pub fn risk(&self) -> RiskLevel {
        self.risk
    }

    /// Location label: "Name (aldea)" when a sub-locality is known
    pub fn location_label(&self) -> String {
        match &self.aldea {
            Some(aldea) => format!("{} ({})", self.name, aldea),
            None => self.name.clone(),
        }
    }
}

/// Filter records to a single department id; `todos` or `None` keeps everything
pub fn filter_records<'a>(
    records: &'a [RegionRecord],
    department_id: Option<&str>,
) -> Vec<&'a RegionRecord> {
    match department_id {
        None | Some(ALL_DEPARTMENTS) => records.iter().collect(),
        Some(id) => records.iter().filter(|r| r.id() == id).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn observation(rain: &str, wind: &str, humidity: &str) -> WeatherObservation {
        WeatherObservation {
            temperature_celsius: dec("24.5"),
            precipitation_mm: dec(rain),
            wind_kph: dec(wind),
            humidity_percent: dec(humidity),
            condition: "Parcialmente nublado".to_string(),
        }
    }

    #[test]
    fn test_directory_has_22_unique_departments() {
        assert_eq!(DEPARTMENTS.len(), 22);
        let ids: HashSet<_> = DEPARTMENTS.iter().map(|d| d.id).collect();
        let names: HashSet<_> = DEPARTMENTS.iter().map(|d| d.name).collect();
        assert_eq!(ids.len(), 22);
        assert_eq!(names.len(), 22);
    }

    #[test]
    fn test_anchors_within_frame() {
        for d in DEPARTMENTS.iter() {
            assert!((0.0..=100.0).contains(&d.anchor.x), "{}", d.name);
            assert!((0.0..=100.0).contains(&d.anchor.y), "{}", d.name);
        }
    }

    #[test]
    fn test_lookups() {
        assert_eq!(find_department("1").unwrap().name, "Petén");
        assert!(find_department("99").is_err());
        assert!(department_coordinates("Petén").is_some());
        assert!(department_coordinates("Peten").is_none());
    }

    #[test]
    fn test_record_reclassify_keeps_metrics() {
        let peten = find_department("1").unwrap();
        let mut record = RegionRecord::from_observation(
            peten,
            observation("6", "19", "60"),
            DataSource::Live,
            ActivityType::Planting,
        );
        assert_eq!(record.risk(), RiskLevel::Low);

        record.reclassify(ActivityType::Spraying);
        assert_eq!(record.risk(), RiskLevel::High);
        assert_eq!(record.rainfall_mm(), dec("6"));
        assert_eq!(record.wind_kph(), dec("19"));

        record.reclassify(ActivityType::Harvest);
        assert_eq!(record.risk(), RiskLevel::Medium);
    }

    #[test]
    fn test_location_label() {
        let record = RegionRecord::from_observation(
            find_department("7").unwrap(),
            observation("6", "5", "60"),
            DataSource::Simulated,
            ActivityType::Planting,
        );
        assert_eq!(record.location_label(), "Sacatepéquez (Antigua)");
    }

    #[test]
    fn test_filter_records() {
        let records: Vec<RegionRecord> = DEPARTMENTS
            .iter()
            .map(|d| {
                RegionRecord::from_observation(
                    d,
                    observation("6", "5", "60"),
                    DataSource::Simulated,
                    ActivityType::Planting,
                )
            })
            .collect();

        assert_eq!(filter_records(&records, None).len(), 22);
        assert_eq!(filter_records(&records, Some("todos")).len(), 22);
        let one = filter_records(&records, Some("4"));
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].name(), "Alta Verapaz");
        assert!(filter_records(&records, Some("404")).is_empty());
    }
}
