//! Notification dispatch over the SMS gateway and messaging deep links
//!
//! Supports:
//! - Multi-endpoint SMS gateway delivery with per-destination fallback
//! - Messaging-app deep links carrying a pre-formatted alert
//! - Gateway configuration load/save through a pluggable store
//! - Background summary dispatch after a dashboard refresh

use std::sync::Arc;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use shared::{
    compose_summary, find_crop, normalize_phone_number, validate_phone_number, ActivityType,
    GatewayConfig, RegionRecord, DEFAULT_CROP_ID, TEST_MESSAGE,
};
use validator::Validate;

use crate::config::{DeepLinkConfig, GatewaySettings};
use crate::error::{AppError, AppResult};
use crate::services::gateway_config::GatewayConfigStore;

/// Outcome of a multi-destination gateway send
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DispatchReport {
    pub sent: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

/// Messaging deep link plus the text it carries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeepLink {
    pub url: String,
    pub message: String,
}

/// HTTP client for SMS gateway relays
#[derive(Clone)]
pub struct GatewayClient {
    http_client: reqwest::Client,
    send_path: String,
}

#[derive(Serialize)]
struct GatewaySendRequest<'a> {
    phone: &'a str,
    to: &'a str,
    message: &'a str,
    token: &'a str,
}

impl GatewayClient {
    /// Create a gateway client with a bounded per-attempt timeout
    pub fn new(settings: &GatewaySettings) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()?;
        Ok(Self {
            http_client,
            send_path: settings.send_path.clone(),
        })
    }

    /// Full send URL for an endpoint base
    pub fn send_url(&self, endpoint: &str) -> String {
        let base = endpoint.trim().trim_end_matches('/');
        let path = self.send_path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    async fn post(
        &self,
        endpoint: &str,
        token: &str,
        phone: &str,
        message: &str,
    ) -> Result<(), String> {
        let request = GatewaySendRequest {
            phone,
            to: phone,
            message,
            token,
        };

        let response = self
            .http_client
            .post(self.send_url(endpoint))
            .bearer_auth(token)
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("{}: {}", endpoint, e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(format!("{}: HTTP {}", endpoint, response.status()))
        }
    }

    /// Deliver one message, trying endpoints in order until one succeeds.
    ///
    /// Returns the endpoint that accepted the message.
    pub async fn send_one<'a>(
        &self,
        config: &'a GatewayConfig,
        phone: &str,
        message: &str,
    ) -> Result<&'a str, String> {
        let mut attempts = Vec::with_capacity(config.endpoints.len());

        for endpoint in &config.endpoints {
            match self.post(endpoint, &config.token, phone, message).await {
                Ok(()) => return Ok(endpoint.as_str()),
                Err(e) => {
                    tracing::warn!("Gateway endpoint failed for {}: {}", phone, e);
                    attempts.push(e);
                }
            }
        }

        if attempts.is_empty() {
            Err("no endpoints configured".to_string())
        } else {
            Err(attempts.join("; "))
        }
    }

    /// Deliver a message to every configured destination.
    ///
    /// Fails before any network call when the token, endpoints or
    /// destinations are missing. A failed destination never stops the rest.
    pub async fn send_to_all(
        &self,
        config: &GatewayConfig,
        message: &str,
    ) -> AppResult<DispatchReport> {
        if let Some(reason) = config.missing_requirement() {
            return Err(AppError::GatewayNotConfigured(reason.to_string()));
        }

        let mut report = DispatchReport::default();
        for phone in &config.phone_numbers {
            match self.send_one(config, phone, message).await {
                Ok(endpoint) => {
                    tracing::info!("SMS sent to {} via {}", phone, endpoint);
                    report.sent += 1;
                }
                Err(e) => {
                    report.failed += 1;
                    report.errors.push(format!("{}: {}", phone, e));
                }
            }
        }

        Ok(report)
    }
}

/// Build a messaging deep link: `<base>?phone=<digits>&text=<message>`
pub fn build_deep_link(base_url: &str, phone: &str, message: &str) -> AppResult<String> {
    validate_phone_number(phone).map_err(|msg| AppError::Validation {
        field: "phone".to_string(),
        message: msg.to_string(),
        message_es: "Ingrese un número de teléfono válido".to_string(),
    })?;

    let digits = normalize_phone_number(phone);
    let url = Url::parse_with_params(base_url, [("phone", digits.as_str()), ("text", message)])
        .map_err(|e| AppError::Configuration(format!("Invalid deep link base URL: {}", e)))?;

    Ok(url.to_string())
}

/// Notification service wiring the gateway, its configuration and deep links
#[derive(Clone)]
pub struct NotificationService {
    store: Arc<dyn GatewayConfigStore>,
    gateway: GatewayClient,
    deep_link_base: String,
}

impl NotificationService {
    pub fn new(
        store: Arc<dyn GatewayConfigStore>,
        gateway: GatewayClient,
        deep_link: &DeepLinkConfig,
    ) -> Self {
        Self {
            store,
            gateway,
            deep_link_base: deep_link.base_url.clone(),
        }
    }

    // ========================================================================
    // Gateway Configuration
    // ========================================================================

    pub async fn gateway_config(&self) -> AppResult<GatewayConfig> {
        self.store.load().await
    }

    /// Validate and store a configuration wholesale
    pub async fn save_gateway_config(&self, config: GatewayConfig) -> AppResult<GatewayConfig> {
        config.validate()?;
        self.store.save(&config).await?;
        Ok(config)
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Send a message to every configured destination
    pub async fn dispatch(&self, message: &str) -> AppResult<DispatchReport> {
        let config = self.store.load().await?;
        let report = self.gateway.send_to_all(&config, message).await?;
        tracing::info!(
            "Gateway dispatch finished: {} sent, {} failed",
            report.sent,
            report.failed
        );
        Ok(report)
    }

    /// Send the fixed test message
    pub async fn send_test(&self) -> AppResult<DispatchReport> {
        self.dispatch(TEST_MESSAGE).await
    }

    /// Deep link for one destination
    pub fn deep_link(&self, phone: &str, message: String) -> AppResult<DeepLink> {
        let url = build_deep_link(&self.deep_link_base, phone, &message)?;
        Ok(DeepLink { url, message })
    }

    /// Dispatch the high-risk summary in the background when auto-send is on.
    ///
    /// Never blocks the caller; every failure is logged and dropped.
    pub fn spawn_auto_send(&self, records: Vec<RegionRecord>, activity: ActivityType) {
        let service = self.clone();
        tokio::spawn(async move {
            match service.auto_send(&records, activity).await {
                Ok(Some(report)) => tracing::info!(
                    "Automatic alert dispatched: {} sent, {} failed",
                    report.sent,
                    report.failed
                ),
                Ok(None) => tracing::debug!("Automatic alerts disabled"),
                Err(e) => tracing::warn!("Automatic alert dispatch failed: {}", e),
            }
        });
    }

    /// Summary dispatch when the stored configuration enables auto-send
    pub async fn auto_send(
        &self,
        records: &[RegionRecord],
        activity: ActivityType,
    ) -> AppResult<Option<DispatchReport>> {
        let config = self.store.load().await?;
        if !config.auto_send_alerts {
            return Ok(None);
        }

        let crop = find_crop(DEFAULT_CROP_ID)?;
        let message = compose_summary(records, crop, activity);
        self.gateway.send_to_all(&config, &message).await.map(Some)
    }
}
