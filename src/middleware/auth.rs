use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::AppError;

// Health and readiness probes stay unauthenticated.
fn is_public_path(path: &str) -> bool {
    path == "/health" || path == "/ready"
}

pub async fn auth_middleware(
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path();
    let method = request.method();

    if is_public_path(path) {
        return Ok(next.run(request).await);
    }

    debug!("Authenticating request: {} {}", method, path);

    let auth_header = headers
        .get("authorization")
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| {
            warn!("Missing or malformed Authorization header for {} {}", method, path);
            AppError::InvalidApiKey
        })?;

    let token = auth_header.strip_prefix("Bearer ").unwrap_or("");
    if token.is_empty() {
        warn!("Authorization header without Bearer token for {} {}", method, path);
        return Err(AppError::InvalidApiKey);
    }

    if !Config::validate_api_key(token) {
        let prefix = if token.len() > 8 { &token[..8] } else { token };
        warn!("Invalid API key attempted for {} {}: {}", method, path, prefix);
        return Err(AppError::InvalidApiKey);
    }

    debug!("API key authenticated for {} {}", method, path);
    Ok(next.run(request).await)
}
