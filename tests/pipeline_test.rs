mod common;

use std::sync::Arc;

use tokio_test::assert_ok;
use weatherflow::alerts::derive;
use weatherflow::fetch::DEFAULT_FETCH_TIMEOUT;
use weatherflow::locations::LocationCatalog;
use weatherflow::store::{MemoryReadingStore, ReadingStore};
use weatherflow::{Location, RawReading, WeatherPipeline};

use common::{answer, observed_at, ScriptedSource};

/// derive -> append -> recent(1) keeps every flag.
#[tokio::test]
async fn test_single_reading_round_trip_through_store() {
    // ---
    let store = MemoryReadingStore::new();
    let raw = RawReading {
        location: "X".to_string(),
        temperature: 22.5,
        humidity: 97.0,
        rainfall: 12.0,
        observed_at: observed_at(),
    };

    assert_ok!(store.append(&[derive(&raw)]).await);
    let recent = assert_ok!(store.recent(1).await);

    assert_eq!(recent.len(), 1);
    let record = &recent[0];
    assert_eq!(record.town, "X");
    assert_eq!(record.temperature, 22.5);
    assert!(record.rain_alert);
    assert!(record.mold_risk);
    assert!(record.alert);
    assert_eq!(record.timestamp, observed_at());
}

/// Repeated batches append; nothing is overwritten.
#[tokio::test]
async fn test_batches_accumulate_and_window_caps_results() {
    // ---
    let names = [
        "Medellín", "Bello", "Envigado", "Itagüí", "Rionegro", "Apartadó", "Turbo",
        "Caucasia", "Jardín", "Santa Fe de Antioquia",
    ];
    let catalog = LocationCatalog::new(
        names
            .iter()
            .map(|n| Location::new(*n, 6.0, -75.5))
            .collect(),
    )
    .unwrap();
    let source = ScriptedSource::new(names.iter().map(|n| (*n, answer(20.0, 70.0, 0.0))));
    let store = Arc::new(MemoryReadingStore::new());
    let pipeline = WeatherPipeline::new(
        catalog,
        Arc::new(source),
        store.clone(),
        DEFAULT_FETCH_TIMEOUT,
        15,
    );

    let first = pipeline.run_batch().await.unwrap();
    let second = pipeline.run_batch().await.unwrap();

    assert_eq!(first.details.len(), 10);
    assert_eq!(second.summary.total_records, 10);
    assert_eq!(store.len(), 20);

    let results = pipeline.latest_results().await.unwrap();
    assert_eq!(results.summary.total_records, 15);
    assert_eq!(results.summary.average_temperature, Some(20.0));
    assert!(results.alerts.is_empty());

    let ids: Vec<i64> = store.recent(15).await.unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, (6..=20).rev().collect::<Vec<i64>>());
}
