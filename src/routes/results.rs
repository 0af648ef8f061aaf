use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use tracing::debug;

use crate::error::Result;
use crate::models::LatestResults;
use crate::pipeline::WeatherPipeline;

// ---

pub fn router() -> Router<Arc<WeatherPipeline>> {
    // ---
    Router::new().route("/results", get(handler))
}

async fn handler(State(pipeline): State<Arc<WeatherPipeline>>) -> Result<Json<LatestResults>> {
    // ---
    let results = pipeline.latest_results().await?;
    debug!(
        "GET /results - {} records, {} alerts",
        results.summary.total_records,
        results.alerts.len()
    );
    Ok(Json(results))
}
