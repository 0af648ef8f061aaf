use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use tracing::info;

use crate::error::Result;
use crate::models::BatchReport;
use crate::pipeline::WeatherPipeline;

// ---

pub fn router() -> Router<Arc<WeatherPipeline>> {
    // ---
    Router::new().route("/fetch_data", get(handler))
}

/// Run one fetch batch and return what was stored.
///
/// Partial or total upstream failure still yields 200 with fewer (or no)
/// `details`; only a storage failure turns into a 500.
async fn handler(State(pipeline): State<Arc<WeatherPipeline>>) -> Result<Json<BatchReport>> {
    // ---
    info!("GET /fetch_data - Starting batch");
    let report = pipeline.run_batch().await?;
    Ok(Json(report))
}
