//! Forecast API client for OpenMeteo integration
//!
//! This module provides the outbound HTTP client used by the weather proxy
//! endpoint. Coordinates are relayed as opaque text, the upstream JSON
//! document is returned verbatim, and upstream failures are classified into
//! the [`GatewayError`] taxonomy at the call boundary.

use crate::GatewayError;
use crate::config::WeatherConfig;
use anyhow::{Context, Result};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// HTTP client for the upstream forecast API
#[derive(Debug, Clone)]
pub struct ForecastClient {
    /// HTTP client, carries the per-call timeout
    client: reqwest::Client,
    /// Base URL of the forecast API, without trailing slash
    base_url: String,
}

/// Assemble the forwarded query pairs.
///
/// An absent coordinate is omitted from the upstream query entirely; present
/// values are forwarded verbatim, with percent-encoding applied by the
/// request builder. No range or numeric validation is performed.
fn forecast_query<'a>(
    latitude: Option<&'a str>,
    longitude: Option<&'a str>,
) -> Vec<(&'static str, &'a str)> {
    let mut pairs = Vec::with_capacity(2);
    if let Some(lat) = latitude {
        pairs.push(("latitude", lat));
    }
    if let Some(lon) = longitude {
        pairs.push(("longitude", lon));
    }
    pairs
}

impl ForecastClient {
    /// Create a new forecast API client
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds.into());

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("meteogate/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch a forecast for the given coordinates and relay the JSON body.
    ///
    /// Performs exactly one outbound call, no retries. Non-2xx status,
    /// timeout, transport failure, and non-JSON body each map to a distinct
    /// [`GatewayError`] variant.
    #[instrument(skip(self))]
    pub async fn forecast(
        &self,
        latitude: Option<&str>,
        longitude: Option<&str>,
    ) -> std::result::Result<Value, GatewayError> {
        let url = format!("{}/forecast", self.base_url);
        let query = forecast_query(latitude, longitude);

        debug!("Forecast API request: {} {:?}", url, query);
        let start_time = Instant::now();

        let response = self.client.get(&url).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Forecast API replied with status {}", status);
            return Err(GatewayError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let document: Value = response.json().await?;

        let total_duration = start_time.elapsed();
        info!(
            "Relayed forecast in {:.3}s",
            total_duration.as_secs_f64()
        );

        if total_duration.as_secs() > 5 {
            warn!(
                "Slow forecast API response: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("40.7128"), Some("-74.0060"), vec![("latitude", "40.7128"), ("longitude", "-74.0060")])]
    #[case(Some("40.7128"), None, vec![("latitude", "40.7128")])]
    #[case(None, Some("-74.0060"), vec![("longitude", "-74.0060")])]
    #[case(None, None, vec![])]
    fn test_forecast_query_omits_absent_params(
        #[case] latitude: Option<&str>,
        #[case] longitude: Option<&str>,
        #[case] expected: Vec<(&str, &str)>,
    ) {
        assert_eq!(forecast_query(latitude, longitude), expected);
    }

    #[rstest]
    #[case("abc")]
    #[case("100")]
    #[case("not a number at all")]
    fn test_forecast_query_forwards_opaque_text(#[case] value: &str) {
        // Coordinates are opaque text; no validation on this side.
        let pairs = forecast_query(Some(value), Some(value));
        assert_eq!(pairs, vec![("latitude", value), ("longitude", value)]);
    }

    #[test]
    fn test_client_strips_trailing_slash() {
        let config = WeatherConfig {
            base_url: "https://api.open-meteo.com/v1/".to_string(),
            timeout_seconds: 30,
        };
        let client = ForecastClient::new(&config).unwrap();
        assert_eq!(client.base_url, "https://api.open-meteo.com/v1");
    }
}
