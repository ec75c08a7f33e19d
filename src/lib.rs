//! `meteogate` - Minimal HTTP gateway relaying OpenMeteo forecasts
//!
//! This library provides the route table, the upstream forecast client,
//! and the configuration surface of the service.

pub mod api;
pub mod config;
pub mod error;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::{GatewayConfig, ServerConfig, WeatherConfig};
pub use error::GatewayError;
pub use weather::ForecastClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
