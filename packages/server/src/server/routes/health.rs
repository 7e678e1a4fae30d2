use std::time::Duration;

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    database: ComponentHealth,
    status_store: ComponentHealth,
}

#[derive(Serialize)]
pub struct ComponentHealth {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ComponentHealth {
    fn from_check(result: Result<anyhow::Result<()>, tokio::time::error::Elapsed>) -> Self {
        match result {
            Ok(Ok(())) => Self {
                status: "ok".to_string(),
                error: None,
            },
            Ok(Err(e)) => Self {
                status: "error".to_string(),
                error: Some(format!("Check failed: {}", e)),
            },
            Err(_) => Self {
                status: "error".to_string(),
                error: Some(format!("Check timeout (>{}s)", CHECK_TIMEOUT.as_secs())),
            },
        }
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Health check endpoint
///
/// Checks the lead list database and the status store. Returns 200 OK if
/// both respond, 503 Service Unavailable otherwise.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let database = ComponentHealth::from_check(
        tokio::time::timeout(CHECK_TIMEOUT, state.deps.lead_lists.ping()).await,
    );
    let status_store = ComponentHealth::from_check(
        tokio::time::timeout(CHECK_TIMEOUT, state.deps.kv.ping()).await,
    );

    let is_healthy = database.is_ok() && status_store.is_ok();

    let overall_status = if is_healthy {
        "healthy"
    } else {
        "unhealthy"
    };

    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: overall_status.to_string(),
            database,
            status_store,
        }),
    )
}
