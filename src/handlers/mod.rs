pub mod extract;
pub mod health;
pub mod optimize;

pub use extract::extract_handler;
pub use health::{health_handler, ready_handler};
pub use optimize::optimize_handler;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::config::Config;
use crate::error::AppResult;
use crate::services::ResumeOptimizer;

/// State shared across handlers: configuration plus the upstream model client.
pub struct AppState {
    pub config: Config,
    pub optimizer: ResumeOptimizer,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let optimizer = ResumeOptimizer::new(&config)?;
        Ok(Self { config, optimizer })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/api/v1/extract", post(extract_handler))
        .route("/api/v1/optimize", post(optimize_handler))
        .with_state(state)
}
