//! Concurrent fan-out over the location catalog.
//!
//! One request per location runs concurrently, each under its own timeout,
//! and the batch is joined before returning. Failures only cost the failing
//! location its slot in the result; they are logged and never returned.

use std::{sync::Arc, time::Duration};

use futures::future::join_all;
use tracing::{info, warn};

use crate::alerts;
use crate::error::FetchError;
use crate::models::{DerivedReading, Location, RawReading};
use crate::weather::WeatherSource;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

pub struct FetchCoordinator {
    source: Arc<dyn WeatherSource>,
    per_location_timeout: Duration,
}

impl FetchCoordinator {
    // ---
    pub fn new(source: Arc<dyn WeatherSource>, per_location_timeout: Duration) -> Self {
        Self {
            source,
            per_location_timeout,
        }
    }

    /// Fetch and derive a reading for every location that answers in time.
    ///
    /// Results follow catalog order. There are no retries; a caller wanting
    /// fresh data runs another batch.
    pub async fn fetch_all(&self, locations: &[Location]) -> Vec<DerivedReading> {
        // ---
        if locations.is_empty() {
            return Vec::new();
        }

        let outcomes = join_all(locations.iter().map(|loc| self.fetch_one(loc))).await;

        let mut readings = Vec::with_capacity(locations.len());
        for (loc, outcome) in locations.iter().zip(outcomes) {
            match outcome {
                Ok(raw) => readings.push(alerts::derive(&raw)),
                Err(e) => log_failure(loc, &e),
            }
        }

        info!(
            requested = locations.len(),
            succeeded = readings.len(),
            failed = locations.len() - readings.len(),
            "Fetch batch complete"
        );
        readings
    }

    async fn fetch_one(&self, location: &Location) -> Result<RawReading, FetchError> {
        // ---
        match tokio::time::timeout(self.per_location_timeout, self.source.get(location)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.per_location_timeout)),
        }
    }
}

fn log_failure(location: &Location, error: &FetchError) {
    // ---
    let town = location.name.as_str();
    match error {
        FetchError::Network(e) => warn!(town = %town, "Network error while fetching: {}", e),
        FetchError::HttpStatus(code) => {
            warn!(town = %town, status = *code, "HTTP error while fetching")
        }
        FetchError::Malformed(reason) => {
            warn!(town = %town, "Malformed response, dropping reading: {}", reason)
        }
        FetchError::Timeout(after) => warn!(town = %town, "No response within {:?}", after),
    }
}
