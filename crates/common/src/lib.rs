pub mod config;
pub mod telemetry;

pub use config::{ApiConfig, AppConfig};
pub use telemetry::{init_telemetry, TelemetryConfig};
