//! Region dataset orchestration
//!
//! Builds one record per department from the weather source, keeps them
//! classified for the selected activity and guards against an older refresh
//! overwriting a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{
    filter_records, find_department, ActivityType, DataSource, Department, ForecastOutlook,
    RegionRecord, DEPARTMENTS,
};
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::external::weather::{
    synthetic_forecast, synthetic_observation, WeatherSource, MAX_FORECAST_DAYS,
};

/// Current dashboard state
#[derive(Debug, Clone)]
struct RegionDataset {
    records: Vec<RegionRecord>,
    activity: ActivityType,
    generation: u64,
    refreshed_at: Option<DateTime<Utc>>,
}

/// Read-only view of the dataset returned to callers
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub activity: ActivityType,
    pub generation: u64,
    pub refreshed_at: Option<DateTime<Utc>>,
    /// False when every record was generated instead of observed
    pub live_weather: bool,
    pub regions: Vec<RegionRecord>,
}

/// Region Dataset Orchestrator
#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn WeatherSource>,
    dataset: Arc<RwLock<RegionDataset>>,
    latest_generation: Arc<AtomicU64>,
}

impl DashboardService {
    pub fn new(source: Arc<dyn WeatherSource>, activity: ActivityType) -> Self {
        Self {
            source,
            dataset: Arc::new(RwLock::new(RegionDataset {
                records: Vec::new(),
                activity,
                generation: 0,
                refreshed_at: None,
            })),
            latest_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn live_weather(&self) -> bool {
        self.source.is_live()
    }

    pub async fn activity(&self) -> ActivityType {
        self.dataset.read().await.activity
    }

    // ========================================================================
    // Refresh
    // ========================================================================

    /// Rebuild all 22 records.
    ///
    /// Departments are fetched one after another without holding the dataset
    /// lock. The result is committed only if no newer refresh started in the
    /// meantime; otherwise it is discarded with [`AppError::RefreshSuperseded`].
    pub async fn refresh(&self, activity: Option<ActivityType>) -> AppResult<DashboardSnapshot> {
        let generation = self.latest_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let build_activity = match activity {
            Some(a) => a,
            None => self.activity().await,
        };

        tracing::info!(
            "Refreshing {} departments (generation {}, activity {})",
            DEPARTMENTS.len(),
            generation,
            build_activity
        );

        let mut records = self.build_records(build_activity).await;

        let mut dataset = self.dataset.write().await;
        if self.latest_generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Discarding superseded refresh (generation {})", generation);
            return Err(AppError::RefreshSuperseded);
        }

        let commit_activity = activity.unwrap_or(dataset.activity);
        if commit_activity != build_activity {
            for record in &mut records {
                record.reclassify(commit_activity);
            }
        }

        dataset.records = records;
        dataset.activity = commit_activity;
        dataset.generation = generation;
        dataset.refreshed_at = Some(Utc::now());

        Ok(self.view(&dataset, None))
    }

    async fn build_records(&self, activity: ActivityType) -> Vec<RegionRecord> {
        if !self.source.is_live() {
            let mut rng = rand::thread_rng();
            return DEPARTMENTS
                .iter()
                .map(|d| {
                    RegionRecord::from_observation(
                        d,
                        synthetic_observation(&mut rng),
                        DataSource::Simulated,
                        activity,
                    )
                })
                .collect();
        }

        // One request in flight at a time, in directory order
        let mut records = Vec::with_capacity(DEPARTMENTS.len());
        for department in DEPARTMENTS.iter() {
            let observation = self.source.fetch_current(department.name).await;
            records.push(Self::record_for(department, observation, activity));
        }
        records
    }

    fn record_for(
        department: &Department,
        observation: Option<shared::WeatherObservation>,
        activity: ActivityType,
    ) -> RegionRecord {
        match observation {
            Some(o) => RegionRecord::from_observation(department, o, DataSource::Live, activity),
            None => RegionRecord::from_observation(
                department,
                synthetic_observation(&mut rand::thread_rng()),
                DataSource::Fallback,
                activity,
            ),
        }
    }

    // ========================================================================
    // Reclassification and reads
    // ========================================================================

    /// Switch the activity and reclassify every record from stored metrics
    pub async fn set_activity(&self, activity: ActivityType) -> DashboardSnapshot {
        let mut dataset = self.dataset.write().await;
        dataset.activity = activity;
        for record in &mut dataset.records {
            record.reclassify(activity);
        }
        tracing::debug!("Activity set to {}", activity);
        self.view(&dataset, None)
    }

    /// Current records, optionally narrowed to one department id (`todos` = all)
    pub async fn snapshot(&self, department_id: Option<&str>) -> DashboardSnapshot {
        let dataset = self.dataset.read().await;
        self.view(&dataset, department_id)
    }

    /// One department's record
    pub async fn region(&self, id: &str) -> AppResult<RegionRecord> {
        find_department(id)?;
        self.dataset
            .read()
            .await
            .records
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Region {}", id)))
    }

    fn view(&self, dataset: &RegionDataset, department_id: Option<&str>) -> DashboardSnapshot {
        DashboardSnapshot {
            activity: dataset.activity,
            generation: dataset.generation,
            refreshed_at: dataset.refreshed_at,
            live_weather: dataset.records.iter().any(|r| !r.source().is_synthetic()),
            regions: filter_records(&dataset.records, department_id)
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    // ========================================================================
    // Forecast
    // ========================================================================

    /// Multi-day outlook for one department; never fails on provider errors
    pub async fn forecast(
        &self,
        department_id: &str,
        days: u8,
        activity: Option<ActivityType>,
    ) -> AppResult<ForecastOutlook> {
        let department = find_department(department_id)?;
        if !(1..=MAX_FORECAST_DAYS).contains(&days) {
            return Err(AppError::Validation {
                field: "days".to_string(),
                message: format!("days must be between 1 and {}", MAX_FORECAST_DAYS),
                message_es: format!("Los días deben estar entre 1 y {}", MAX_FORECAST_DAYS),
            });
        }
        let activity = match activity {
            Some(a) => a,
            None => self.activity().await,
        };

        let fetched = if self.source.is_live() {
            self.source.fetch_forecast(department.name, days).await
        } else {
            None
        };

        let (forecasts, source) = match fetched {
            Some(f) => (f, DataSource::Live),
            None => {
                let source = if self.source.is_live() {
                    DataSource::Fallback
                } else {
                    DataSource::Simulated
                };
                let start = Utc::now().date_naive();
                (synthetic_forecast(&mut rand::thread_rng(), start, days), source)
            }
        };

        Ok(ForecastOutlook::classify(department.name, forecasts, source, activity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::OfflineWeather;

    fn service() -> DashboardService {
        DashboardService::new(Arc::new(OfflineWeather), ActivityType::Planting)
    }

    #[tokio::test]
    async fn test_empty_before_first_refresh() {
        let dashboard = service();
        let snapshot = dashboard.snapshot(None).await;
        assert!(snapshot.regions.is_empty());
        assert_eq!(snapshot.generation, 0);
        assert!(matches!(dashboard.region("1").await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_offline_refresh_is_simulated() {
        let dashboard = service();
        let snapshot = dashboard.refresh(None).await.unwrap();
        assert_eq!(snapshot.regions.len(), 22);
        assert!(!snapshot.live_weather);
        assert!(snapshot
            .regions
            .iter()
            .all(|r| r.source() == DataSource::Simulated));
    }

    #[tokio::test]
    async fn test_forecast_validation() {
        let dashboard = service();
        assert!(matches!(
            dashboard.forecast("1", 0, None).await,
            Err(AppError::Validation { .. })
        ));
        assert!(matches!(
            dashboard.forecast("99", 3, None).await,
            Err(AppError::NotFound(_))
        ));

        let outlook = dashboard.forecast("1", 3, Some(ActivityType::Harvest)).await.unwrap();
        assert_eq!(outlook.days.len(), 3);
        assert_eq!(outlook.source, DataSource::Simulated);
        assert_eq!(outlook.department, "Petén");
    }
}
