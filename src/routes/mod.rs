//! Route gateway: merges every endpoint's subrouter and attaches shared
//! state and middleware, so `main.rs` only sees [`router`].

use std::sync::Arc;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::pipeline::WeatherPipeline;

mod fetch_data;
mod health;
mod results;

// ---

pub fn router(pipeline: Arc<WeatherPipeline>) -> Router {
    // ---
    Router::new()
        .merge(fetch_data::router())
        .merge(results::router())
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(pipeline)
}
