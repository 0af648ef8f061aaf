//! Data models for the weather pipeline.
//!
//! Readings flow through three shapes: [`RawReading`] as returned by the
//! weather provider, [`DerivedReading`] once alert flags are attached, and
//! [`StoredRecord`] after the store has assigned an id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---

/// A monitored municipality. Identity is the name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    // ---
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    // ---
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }
}

/// Current conditions for one location as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawReading {
    // ---
    #[serde(rename = "town")]
    pub location: String,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity, 0-100 %.
    pub humidity: f64,
    /// Rainfall over the last hour, mm/h.
    pub rainfall: f64,
    #[serde(rename = "timestamp")]
    pub observed_at: DateTime<Utc>,
}

/// A raw reading with its alert flags.
///
/// Only [`crate::alerts::derive`] builds one, so `alert` always equals
/// `rain_alert || mold_risk`. The flags are read through accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedReading {
    // ---
    #[serde(flatten)]
    pub reading: RawReading,
    pub(crate) rain_alert: bool,
    pub(crate) mold_risk: bool,
    pub(crate) alert: bool,
}

impl DerivedReading {
    // ---
    pub(crate) fn new(reading: RawReading, rain_alert: bool, mold_risk: bool) -> Self {
        // ---
        Self {
            reading,
            rain_alert,
            mold_risk,
            alert: rain_alert || mold_risk,
        }
    }

    pub fn rain_alert(&self) -> bool {
        self.rain_alert
    }

    pub fn mold_risk(&self) -> bool {
        self.mold_risk
    }

    pub fn alert(&self) -> bool {
        self.alert
    }
}

/// One row of the `weather_logs` table.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct StoredRecord {
    // ---
    pub id: i64,
    pub town: String,
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
    pub rain_alert: bool,
    pub mold_risk: bool,
    pub alert: bool,
    pub timestamp: DateTime<Utc>,
}

impl StoredRecord {
    // ---
    pub(crate) fn from_derived(id: i64, derived: &DerivedReading) -> Self {
        // ---
        let r = &derived.reading;
        Self {
            id,
            town: r.location.clone(),
            temperature: r.temperature,
            humidity: r.humidity,
            rainfall: r.rainfall,
            rain_alert: derived.rain_alert,
            mold_risk: derived.mold_risk,
            alert: derived.alert,
            timestamp: r.observed_at,
        }
    }
}

/// Rolling statistics over a window of readings. Never stored.
///
/// Averages are `None` for an empty window so "no data" is not confused
/// with a zero reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    // ---
    pub average_temperature: Option<f64>,
    pub average_humidity: Option<f64>,
    pub total_records: usize,
}

/// Alerting record as exposed by `GET /results`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertView {
    // ---
    pub town: String,
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
    pub alert: bool,
    pub timestamp: DateTime<Utc>,
}

impl From<&StoredRecord> for AlertView {
    fn from(r: &StoredRecord) -> Self {
        Self {
            town: r.town.clone(),
            temperature: r.temperature,
            humidity: r.humidity,
            rainfall: r.rainfall,
            alert: r.alert,
            timestamp: r.timestamp,
        }
    }
}

/// Response body of `GET /fetch_data`.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    // ---
    pub summary: Summary,
    pub details: Vec<DerivedReading>,
}

/// Response body of `GET /results`.
#[derive(Debug, Clone, Serialize)]
pub struct LatestResults {
    // ---
    pub summary: Summary,
    pub alerts: Vec<AlertView>,
}
