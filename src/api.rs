//! HTTP handlers and route table
//!
//! The router is composed once at process start and holds no mutable
//! request-scoped state. Each handler is a pure function of the request;
//! only the weather proxy has an external collaborator.

use axum::{
    Router,
    extract::{Query, State},
    response::{Html, Json},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{GatewayError, weather::ForecastClient};

/// Constant health payload, `{"status":"healthy"}` on the wire
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

/// Query parameters accepted by the weather proxy endpoint.
///
/// Both coordinates are optional opaque text; absence and malformed values
/// are forwarded upstream rather than rejected here.
#[derive(Debug, Deserialize)]
pub struct ForecastParams {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

/// Build the route table. Unmatched paths yield 404 and a wrong method on a
/// known path yields 405, both from the routing layer.
pub fn router(client: ForecastClient) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/weather", get(weather))
        .with_state(client)
}

async fn index() -> Html<&'static str> {
    Html("<h1>Hello World</h1>")
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "healthy" })
}

/// Relay the coordinates to the forecast API and the forecast document back.
async fn weather(
    State(client): State<ForecastClient>,
    Query(params): Query<ForecastParams>,
) -> Result<Json<Value>, GatewayError> {
    let document = client
        .forecast(params.latitude.as_deref(), params.longitude.as_deref())
        .await?;
    Ok(Json(document))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_index_body() {
        let Html(body) = index().await;
        assert!(body.contains("Hello World"));
        assert_eq!(body, "<h1>Hello World</h1>");
    }

    #[tokio::test]
    async fn test_health_payload() {
        let Json(status) = health().await;
        assert_eq!(
            serde_json::to_string(&status).unwrap(),
            r#"{"status":"healthy"}"#
        );
    }
}
