use super::types::{ApiError, HealthResponse, RunResponse};
use crate::pipeline::QueryPipeline;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, header::AUTHORIZATION},
    response::{Html, Json},
};
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

pub const SERVICE_NAME: &str = "LLM Query Retrieval System";

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<QueryPipeline>,
}

pub async fn run(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<RunResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    async move {
        info!("Received run request ({} byte body)", body.len());

        match state.pipeline.run(auth_header, &body).await {
            Ok(answers) => {
                info!("Run completed with {} answers", answers.len());
                Ok(Json(RunResponse { answers }))
            }
            Err(failure) => {
                error!("Run request failed: {:?}", failure);
                Err(ApiError::from(failure))
            }
        }
    }
    .instrument(info_span!("run", %request_id))
    .await
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        service: SERVICE_NAME,
    })
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
