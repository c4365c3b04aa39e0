use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    response::Json,
};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::handlers::AppState;
use crate::middleware::try_acquire_permit;
use crate::models::{OptimizeRequest, OptimizeResponse};

pub async fn optimize_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<OptimizeRequest>,
) -> AppResult<Json<OptimizeResponse>> {
    let start = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string()[..8].to_string();

    info!(request_id = %request_id, "Starting resume optimization request");

    let _permit = try_acquire_permit().ok_or_else(|| {
        warn!(request_id = %request_id, "Rate limit exceeded");
        AppError::RateLimitExceeded
    })?;

    if payload.job_description.trim().is_empty() {
        return Err(AppError::validation("job_description is required"));
    }
    if payload.resume.trim().is_empty() {
        return Err(AppError::validation("resume is required"));
    }

    let result = state
        .optimizer
        .optimize(&payload.job_description, &payload.resume)
        .await?;

    let total_time = start.elapsed().as_millis() as u64;
    info!(
        request_id = %request_id,
        score = result.score,
        total_time_ms = total_time,
        "Optimization completed"
    );

    Ok(Json(OptimizeResponse::new(result, total_time)))
}
