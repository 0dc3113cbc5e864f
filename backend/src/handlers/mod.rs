//! HTTP handlers

pub mod crops;
pub mod health;
pub mod notification;
pub mod regions;

pub use crops::*;
pub use health::*;
pub use notification::*;
pub use regions::*;
