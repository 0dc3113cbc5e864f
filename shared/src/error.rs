//! Domain errors for lookups and parsing

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown activity type: {0}")]
    UnknownActivity(String),

    #[error("Unknown risk level: {0}")]
    UnknownRiskLevel(String),

    #[error("Unknown department: {0}")]
    UnknownDepartment(String),

    #[error("Unknown crop: {0}")]
    UnknownCrop(String),
}
