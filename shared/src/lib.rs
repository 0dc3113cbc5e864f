//! Shared types and models for the Utzk'aslem agricultural advisory dashboard
//!
//! This crate contains the pure domain logic shared between the backend,
//! the browser dashboard (via WASM), and tests: risk classification, the
//! department directory, the crop catalog, and alert message composition.

pub mod error;
pub mod models;
pub mod types;
pub mod validation;

pub use error::*;
pub use models::*;
pub use types::*;
pub use validation::*;
