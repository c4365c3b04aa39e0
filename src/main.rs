use std::env;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod handlers;
mod middleware;
mod models;
mod services;

use config::Config;
use handlers::AppState;
use middleware::{auth_middleware, logging_middleware};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "resumatch=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting Resumatch resume optimization service");
    tracing::info!("Max file size: {}MB", config.max_file_size_mb);
    tracing::info!("Model: {}", config.openai_model);

    let max_body_bytes = config.max_file_size_bytes();
    let server_host = config.server_host.clone();
    let server_port = config.server_port;

    let state = Arc::new(AppState::new(config)?);

    let app = handlers::router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(DefaultBodyLimit::max(max_body_bytes))
            .layer(axum::middleware::from_fn(logging_middleware))
            .layer(axum::middleware::from_fn(auth_middleware)),
    );

    // PORT takes precedence for platform deployments.
    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(server_port);

    let addr = format!("{}:{}", server_host, port);
    tracing::info!("Server listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
