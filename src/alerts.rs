//! Threshold-based alert rules.

use crate::models::{DerivedReading, RawReading};

/// Rainfall at or above this rate (mm/h) raises a rain alert.
pub const RAIN_ALERT_MM_PER_HOUR: f64 = 10.0;

/// Relative humidity at or above this level (%) flags mold risk.
pub const MOLD_RISK_HUMIDITY_PCT: f64 = 95.0;

// ---

/// Attach alert flags to a raw reading. Both thresholds are inclusive.
pub fn derive(raw: &RawReading) -> DerivedReading {
    // ---
    let rain_alert = raw.rainfall >= RAIN_ALERT_MM_PER_HOUR;
    let mold_risk = raw.humidity >= MOLD_RISK_HUMIDITY_PCT;

    DerivedReading::new(raw.clone(), rain_alert, mold_risk)
}
