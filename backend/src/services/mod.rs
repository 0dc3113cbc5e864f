//! Business logic services for the Utzk'aslem dashboard

pub mod dashboard;
pub mod gateway_config;
pub mod notification;

pub use dashboard::{DashboardService, DashboardSnapshot};
pub use gateway_config::{FileGatewayConfigStore, GatewayConfigStore, MemoryGatewayConfigStore};
pub use notification::{DeepLink, DispatchReport, GatewayClient, NotificationService};
