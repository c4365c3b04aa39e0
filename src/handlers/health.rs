use std::sync::Arc;
use std::time::SystemTime;

use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};
use tracing::info;

use crate::error::AppResult;
use crate::handlers::AppState;
use crate::middleware::get_rate_limit_metrics;

pub async fn health_handler(State(state): State<Arc<AppState>>) -> AppResult<Json<Value>> {
    let timestamp = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    // Extraction uses in-process libraries only; the optimizer needs an
    // upstream API key.
    let optimizer_available = state.optimizer.is_available();
    let status = if optimizer_available { "healthy" } else { "degraded" };

    let (total_requests, rejected_requests, available_permits) = get_rate_limit_metrics();

    let response = json!({
        "status": status,
        "timestamp": timestamp,
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "document_extractor": true,
            "optimizer": optimizer_available
        },
        "rate_limiting": {
            "total_requests": total_requests,
            "rejected_requests": rejected_requests,
            "available_permits": available_permits
        }
    });

    info!(
        status = status,
        optimizer_available = optimizer_available,
        "Health check completed"
    );

    Ok(Json(response))
}

pub async fn ready_handler() -> StatusCode {
    StatusCode::OK
}
