pub mod alerts;
pub mod billing;
pub mod entry;
pub mod error;
pub mod metrics;
pub mod sample;
pub mod snapshot;
pub mod tables;
pub mod types;

pub use error::DashboardError;
pub use types::*;

/// Standard result type for all dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
