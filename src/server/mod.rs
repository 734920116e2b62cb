pub mod handlers;
pub mod types;

use crate::{Result, config::Config, pipeline::QueryPipeline};
use axum::{
    Router,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::{any::Any, net::SocketAddr, sync::Arc};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

pub use handlers::AppState;
pub use types::{ApiError, ErrorResponse, HealthResponse, RunResponse};

/// Builds the HTTP surface around an already-configured pipeline.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1", get(handlers::index))
        .route("/api/v1/health", get(handlers::health))
        .route("/api/v1/hackrx/run", post(handlers::run))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Unhandled error: {}", detail);
    ApiError::unexpected().into_response()
}

pub async fn run(config: Config) -> Result<()> {
    let pipeline = QueryPipeline::from_config(&config)?;

    let app_state = AppState {
        pipeline: Arc::new(pipeline),
    };

    let app = router(app_state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("LLM Query Retrieval System running on http://{}", addr);
    info!("API endpoint: http://{}/api/v1/hackrx/run", addr);
    info!("Health check: http://{}/api/v1/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
