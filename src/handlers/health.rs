use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::config;
use crate::database::manager::DatabaseManager;

/// Timeout for the token-provider reachability probe. The only deliberate
/// timeout in the system; everything else rides on client defaults.
const PROVIDER_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

const STATUS_OK: &str = "ok";
const STATUS_UNREACHABLE: &str = "unreachable";

/// GET /health/live - the process is up and serving
pub async fn health_live() -> Json<&'static str> {
    Json("OK")
}

/// GET /health/ready - per-dependency status map, 503 when anything is down
pub async fn health_ready() -> impl IntoResponse {
    let database = match DatabaseManager::health_check().await {
        Ok(()) => STATUS_OK,
        Err(e) => {
            tracing::warn!("readiness: record store unreachable: {}", e);
            STATUS_UNREACHABLE
        }
    };

    let token_provider = if ping_token_provider().await {
        STATUS_OK
    } else {
        STATUS_UNREACHABLE
    };

    let status = if database == STATUS_OK && token_provider == STATUS_OK {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "database": database,
            "token_provider": token_provider
        })),
    )
}

/// Any HTTP response within the timeout counts as reachable; there is no
/// contract on the provider's routes beyond it answering at all.
async fn ping_token_provider() -> bool {
    let url = &config::config().token_provider_url;
    if url.is_empty() {
        return false;
    }

    let client = reqwest::Client::new();
    match client.get(url).timeout(PROVIDER_PROBE_TIMEOUT).send().await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!("readiness: token provider unreachable: {}", e);
            false
        }
    }
}
