//! Fetch-transform-persist batch and the read-side query, wired together for
//! the HTTP layer.

use std::{sync::Arc, time::Duration};

use tracing::info;

use crate::error::StorageError;
use crate::fetch::FetchCoordinator;
use crate::locations::LocationCatalog;
use crate::models::{AlertView, BatchReport, LatestResults};
use crate::store::ReadingStore;
use crate::summary;
use crate::weather::WeatherSource;

pub const DEFAULT_RESULTS_WINDOW: i64 = 15;

pub struct WeatherPipeline {
    catalog: LocationCatalog,
    coordinator: FetchCoordinator,
    store: Arc<dyn ReadingStore>,
    results_window: i64,
}

impl WeatherPipeline {
    // ---
    pub fn new(
        catalog: LocationCatalog,
        source: Arc<dyn WeatherSource>,
        store: Arc<dyn ReadingStore>,
        fetch_timeout: Duration,
        results_window: i64,
    ) -> Self {
        // ---
        Self {
            catalog,
            coordinator: FetchCoordinator::new(source, fetch_timeout),
            store,
            results_window,
        }
    }

    /// One batch over the whole catalog.
    ///
    /// Upstream failures shrink `details`; only a storage failure is an error.
    /// The summary covers this batch, not the stored history.
    pub async fn run_batch(&self) -> Result<BatchReport, StorageError> {
        // ---
        let details = self.coordinator.fetch_all(self.catalog.locations()).await;
        self.store.append(&details).await?;

        let summary = summary::summarize_readings(&details);
        info!(
            "Batch stored {} of {} locations",
            details.len(),
            self.catalog.len()
        );
        Ok(BatchReport { summary, details })
    }

    /// Summary and alerting records over the most recent window.
    pub async fn latest_results(&self) -> Result<LatestResults, StorageError> {
        // ---
        let records = self.store.recent(self.results_window).await?;

        let summary = summary::summarize(&records);
        let alerts = summary::active_alerts(&records)
            .iter()
            .map(AlertView::from)
            .collect();
        Ok(LatestResults { summary, alerts })
    }

    pub fn storage_backend(&self) -> &'static str {
        self.store.backend_name()
    }
}
