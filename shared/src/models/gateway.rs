//! SMS gateway configuration

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{validate_endpoint_list, validate_phone_list};

/// Key the configuration blob is stored under
pub const GATEWAY_CONFIG_KEY: &str = "sms_gateway_config";

/// Relay used when nothing has been configured yet
pub const DEFAULT_GATEWAY_ENDPOINT: &str = "http://127.0.0.1:8082";

/// Settings for the HTTP SMS gateway transport.
///
/// Serialized with camelCase keys so a blob written by the browser dashboard
/// loads unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    /// Candidate relay base URLs, tried in order
    #[validate(custom = "validate_endpoint_list")]
    pub endpoints: Vec<String>,
    /// Bearer token shared with the relays
    pub token: String,
    /// Destination phone numbers
    #[validate(custom = "validate_phone_list")]
    pub phone_numbers: Vec<String>,
    /// Dispatch a summary after every completed refresh
    pub auto_send_alerts: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoints: vec![DEFAULT_GATEWAY_ENDPOINT.to_string()],
            token: String::new(),
            phone_numbers: Vec::new(),
            auto_send_alerts: false,
        }
    }
}

/// Partially stored configuration; absent keys keep their defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfigOverride {
    pub endpoints: Option<Vec<String>>,
    pub token: Option<String>,
    pub phone_numbers: Option<Vec<String>>,
    pub auto_send_alerts: Option<bool>,
}

impl GatewayConfig {
    /// Overlay stored fields onto this configuration
    pub fn overlay(self, stored: GatewayConfigOverride) -> Self {
        Self {
            endpoints: stored.endpoints.unwrap_or(self.endpoints),
            token: stored.token.unwrap_or(self.token),
            phone_numbers: stored.phone_numbers.unwrap_or(self.phone_numbers),
            auto_send_alerts: stored.auto_send_alerts.unwrap_or(self.auto_send_alerts),
        }
    }

    /// Parse a stored blob and overlay it onto the defaults
    pub fn from_stored_json(json: &str) -> Result<Self, serde_json::Error> {
        let stored: GatewayConfigOverride = serde_json::from_str(json)?;
        Ok(Self::default().overlay(stored))
    }

    /// Reason the gateway cannot send, if any
    pub fn missing_requirement(&self) -> Option<&'static str> {
        if self.token.trim().is_empty() {
            Some("Token no configurado")
        } else if self.endpoints.is_empty() {
            Some("No hay endpoints configurados")
        } else if self.phone_numbers.is_empty() {
            Some("No hay números de teléfono configurados")
        } else {
            None
        }
    }
}
