//! Rolling statistics over a window of readings.
//!
//! Everything here is a pure function over the snapshot handed in; callers
//! query the store themselves.

use crate::models::{DerivedReading, StoredRecord, Summary};

// ---

/// Mean temperature and humidity (rounded to 2 decimals) and the record count.
pub fn summarize(records: &[StoredRecord]) -> Summary {
    // ---
    build_summary(records.iter().map(|r| (r.temperature, r.humidity)))
}

/// Same statistics over a freshly fetched batch.
pub fn summarize_readings(readings: &[DerivedReading]) -> Summary {
    // ---
    build_summary(
        readings
            .iter()
            .map(|d| (d.reading.temperature, d.reading.humidity)),
    )
}

/// Records with `alert` set, in input order.
pub fn active_alerts(records: &[StoredRecord]) -> Vec<StoredRecord> {
    // ---
    records.iter().filter(|r| r.alert).cloned().collect()
}

// ---

fn build_summary(values: impl Iterator<Item = (f64, f64)>) -> Summary {
    // ---
    let (count, temp_sum, humidity_sum) =
        values.fold((0usize, 0.0, 0.0), |(n, t, h), (temp, hum)| {
            (n + 1, t + temp, h + hum)
        });

    if count == 0 {
        return Summary {
            average_temperature: None,
            average_humidity: None,
            total_records: 0,
        };
    }

    Summary {
        average_temperature: Some(round2(temp_sum / count as f64)),
        average_humidity: Some(round2(humidity_sum / count as f64)),
        total_records: count,
    }
}

/// Round to 2 decimals, ties to even.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn record(id: i64, temperature: f64, humidity: f64, alert: bool) -> StoredRecord {
        // ---
        StoredRecord {
            id,
            town: format!("town-{id}"),
            temperature,
            humidity,
            rainfall: 0.0,
            rain_alert: false,
            mold_risk: alert,
            alert,
            timestamp: Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
                - Duration::minutes(id),
        }
    }

    #[test]
    fn test_empty_window_has_null_averages() {
        // ---
        let summary = summarize(&[]);
        assert_eq!(
            summary,
            Summary {
                average_temperature: None,
                average_humidity: None,
                total_records: 0,
            }
        );
    }

    #[test]
    fn test_average_temperature() {
        // ---
        let records = vec![record(1, 20.0, 60.0, false), record(2, 25.0, 80.0, false)];
        let summary = summarize(&records);

        assert_eq!(summary.average_temperature, Some(22.5));
        assert_eq!(summary.average_humidity, Some(70.0));
        assert_eq!(summary.total_records, 2);
    }

    #[test]
    fn test_averages_round_to_two_decimals() {
        // ---
        let records = vec![
            record(1, 20.0, 70.0, false),
            record(2, 21.0, 71.0, false),
            record(3, 21.0, 71.0, false),
        ];
        let summary = summarize(&records);

        assert_eq!(summary.average_temperature, Some(20.67));
        assert_eq!(summary.average_humidity, Some(70.67));
    }

    #[test]
    fn test_halfway_averages_round_to_even() {
        // ---
        let records = vec![record(1, 22.0, 50.0, false), record(2, 22.25, 50.25, false)];
        let summary = summarize(&records);
        assert_eq!(summary.average_temperature, Some(22.12));
        assert_eq!(summary.average_humidity, Some(50.12));

        let records = vec![record(1, 20.0, 60.0, false), record(2, 20.25, 60.5, false)];
        let summary = summarize(&records);
        assert_eq!(summary.average_temperature, Some(20.12));
        assert_eq!(summary.average_humidity, Some(60.25));

        // Not a tie: plain nearest rounding.
        let records = vec![record(1, 20.0, 60.0, false), record(2, 20.26, 60.0, false)];
        assert_eq!(summarize(&records).average_temperature, Some(20.13));
    }

    #[test]
    fn test_zero_readings_are_not_null() {
        // ---
        let summary = summarize(&[record(1, 0.0, 0.0, false)]);
        assert_eq!(summary.average_temperature, Some(0.0));
        assert_eq!(summary.average_humidity, Some(0.0));
    }

    #[test]
    fn test_active_alerts_preserves_order() {
        // ---
        let records = vec![
            record(5, 20.0, 96.0, true),
            record(4, 20.0, 50.0, false),
            record(3, 20.0, 97.0, true),
            record(2, 20.0, 99.0, true),
        ];
        let ids: Vec<i64> = active_alerts(&records).iter().map(|r| r.id).collect();

        assert_eq!(ids, vec![5, 3, 2]);
        assert!(active_alerts(&[]).is_empty());
    }
}
