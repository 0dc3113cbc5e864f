//! Persistence for the SMS gateway configuration
//!
//! The configuration is a single JSON blob stored under a fixed key. Loading
//! overlays whatever was stored onto the defaults; saving replaces the blob
//! wholesale.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use shared::{GatewayConfig, GATEWAY_CONFIG_KEY};
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};

/// Storage backend for [`GatewayConfig`]
#[axum::async_trait]
pub trait GatewayConfigStore: Send + Sync {
    /// Stored configuration overlaid onto the defaults
    async fn load(&self) -> AppResult<GatewayConfig>;

    /// Overwrite the stored configuration
    async fn save(&self, config: &GatewayConfig) -> AppResult<()>;
}

fn parse_stored(blob: &str) -> AppResult<GatewayConfig> {
    GatewayConfig::from_stored_json(blob).map_err(|e| {
        AppError::Configuration(format!("Stored gateway configuration is invalid: {}", e))
    })
}

fn serialize(config: &GatewayConfig) -> AppResult<String> {
    serde_json::to_string_pretty(config).map_err(|e| {
        AppError::Internal(format!("Failed to serialize gateway configuration: {}", e))
    })
}

/// JSON file on local disk
#[derive(Debug, Clone)]
pub struct FileGatewayConfigStore {
    path: PathBuf,
}

impl FileGatewayConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[axum::async_trait]
impl GatewayConfigStore for FileGatewayConfigStore {
    async fn load(&self) -> AppResult<GatewayConfig> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(blob) => parse_stored(&blob),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(GatewayConfig::default()),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn save(&self, config: &GatewayConfig) -> AppResult<()> {
        let blob = serialize(config)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        tokio::fs::write(&self.path, blob).await.map_err(|e| {
            AppError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })?;

        tracing::info!("Gateway configuration saved to {}", self.path.display());
        Ok(())
    }
}

/// In-process key-value store, used when nothing should touch the disk
#[derive(Debug, Default)]
pub struct MemoryGatewayConfigStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryGatewayConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a raw blob, as if a previous session had saved it
    pub fn with_blob(blob: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(GATEWAY_CONFIG_KEY.to_string(), blob.into());
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[axum::async_trait]
impl GatewayConfigStore for MemoryGatewayConfigStore {
    async fn load(&self) -> AppResult<GatewayConfig> {
        match self.entries.read().await.get(GATEWAY_CONFIG_KEY) {
            Some(blob) => parse_stored(blob),
            None => Ok(GatewayConfig::default()),
        }
    }

    async fn save(&self, config: &GatewayConfig) -> AppResult<()> {
        let blob = serialize(config)?;
        self.entries
            .write()
            .await
            .insert(GATEWAY_CONFIG_KEY.to_string(), blob);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_defaults_then_saves() {
        let store = MemoryGatewayConfigStore::new();
        assert_eq!(store.load().await.unwrap(), GatewayConfig::default());

        let config = GatewayConfig {
            token: "secreto".to_string(),
            phone_numbers: vec!["+50255550000".to_string()],
            ..GatewayConfig::default()
        };
        store.save(&config).await.unwrap();
        assert_eq!(store.load().await.unwrap(), config);
    }

    #[tokio::test]
    async fn test_memory_store_overlays_partial_blob() {
        let store = MemoryGatewayConfigStore::with_blob(r#"{"autoSendAlerts": true}"#);
        let config = store.load().await.unwrap();
        assert!(config.auto_send_alerts);
        assert_eq!(config.endpoints, GatewayConfig::default().endpoints);
    }

    #[tokio::test]
    async fn test_malformed_blob_is_configuration_error() {
        let store = MemoryGatewayConfigStore::with_blob("{not json");
        assert!(matches!(store.load().await, Err(AppError::Configuration(_))));
    }
}
