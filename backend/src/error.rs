//! Error handling for the Utzk'aslem dashboard server
//!
//! Provides consistent error responses in Spanish and English

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::DomainError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_es: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Dashboard errors
    #[error("Refresh superseded by a newer refresh")]
    RefreshSuperseded,

    // Notification errors
    #[error("Gateway not configured: {0}")]
    GatewayNotConfigured(String),

    // Persistence errors
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_es: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UnknownActivity(name) => AppError::Validation {
                field: "activity".to_string(),
                message: format!("Unknown activity: {}", name),
                message_es: format!("Actividad desconocida: {}", name),
            },
            DomainError::UnknownRiskLevel(name) => AppError::Validation {
                field: "risk".to_string(),
                message: format!("Unknown risk level: {}", name),
                message_es: format!("Nivel de riesgo desconocido: {}", name),
            },
            DomainError::UnknownDepartment(id) => AppError::NotFound(format!("Department {}", id)),
            DomainError::UnknownCrop(id) => AppError::Validation {
                field: "crop".to_string(),
                message: format!("Unknown crop: {}", id),
                message_es: format!("Cultivo desconocido: {}", id),
            },
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let first = field_errors
            .iter()
            .min_by_key(|(field, _)| **field)
            .and_then(|(field, errs)| errs.first().map(|e| (*field, e)));

        match first {
            Some((field, err)) => {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                AppError::Validation {
                    field: field.to_string(),
                    message_es: format!("Valor no válido en {}: {}", field, message),
                    message,
                }
            }
            None => AppError::ValidationError(errors.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation {
                field,
                message,
                message_es,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_es: message_es.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_es: format!("Datos no válidos: {}", msg),
                    field: None,
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message_en: format!("{} not found", resource),
                    message_es: format!("No se encontró {}", resource),
                    field: None,
                },
            ),
            AppError::RefreshSuperseded => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "REFRESH_SUPERSEDED".to_string(),
                    message_en: "A newer refresh replaced this one".to_string(),
                    message_es: "Una actualización más reciente reemplazó a esta".to_string(),
                    field: None,
                },
            ),
            AppError::GatewayNotConfigured(reason) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "GATEWAY_NOT_CONFIGURED".to_string(),
                    message_en: "SMS gateway is not configured".to_string(),
                    message_es: reason.clone(),
                    field: None,
                },
            ),
            AppError::Storage(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "STORAGE_ERROR".to_string(),
                    message_en: format!("Storage error: {}", msg),
                    message_es: format!("Error de almacenamiento: {}", msg),
                    field: None,
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message_en: format!("Configuration error: {}", msg),
                    message_es: format!("Error de configuración: {}", msg),
                    field: None,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_es: "Error interno del servidor".to_string(),
                    field: None,
                },
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: "An internal server error occurred".to_string(),
                    message_es: "Error interno del servidor".to_string(),
                    field: None,
                },
            ),
        };

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::ValidationError("x".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("Region 99".into()), StatusCode::NOT_FOUND),
            (AppError::RefreshSuperseded, StatusCode::CONFLICT),
            (
                AppError::GatewayNotConfigured("Token no configurado".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (AppError::Storage("disk".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_domain_error_mapping() {
        assert!(matches!(
            AppError::from(DomainError::UnknownDepartment("99".into())),
            AppError::NotFound(_)
        ));
        match AppError::from(DomainError::UnknownActivity("riego".into())) {
            AppError::Validation { field, .. } => assert_eq!(field, "activity"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
