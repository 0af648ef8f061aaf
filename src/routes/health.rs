// src/routes/health.rs
//! Liveness endpoint for the weatherflow service.
//!
//! `GET /health` answers without touching the database or the weather
//! provider, so orchestrators can probe it cheaply. It also reports which
//! storage backend the process was started with, which makes an accidental
//! in-memory deployment visible.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::pipeline::WeatherPipeline;

/// JSON response body for the `/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    storage: &'static str,
}

async fn health(State(pipeline): State<Arc<WeatherPipeline>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        storage: pipeline.storage_backend(),
    })
}

pub fn router() -> Router<Arc<WeatherPipeline>> {
    Router::new().route("/health", get(health))
}
