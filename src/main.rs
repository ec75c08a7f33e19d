use anyhow::Result;
use tracing_subscriber::EnvFilter;

use meteogate::{ForecastClient, GatewayConfig, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = GatewayConfig::load()?;

    let default_filter = if config.server.debug {
        "meteogate=debug,info"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    tracing::info!(
        "Starting meteogate {} (upstream: {})",
        meteogate::VERSION,
        config.weather.base_url
    );

    let client = ForecastClient::new(&config.weather)?;
    web::run(&config.server, client).await
}
