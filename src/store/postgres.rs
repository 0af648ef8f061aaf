use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::ReadingStore;
use crate::error::StorageError;
use crate::models::{DerivedReading, StoredRecord};

/// `weather_logs` table in PostgreSQL.
///
/// Each call checks a connection out of the pool for its own duration; the
/// pool takes it back on every exit path, including errors.
#[derive(Debug, Clone)]
pub struct PgReadingStore {
    pool: PgPool,
}

impl PgReadingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ReadingStore for PgReadingStore {
    async fn append(&self, readings: &[DerivedReading]) -> Result<Vec<StoredRecord>, StorageError> {
        // ---
        if readings.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.pool.begin().await?;

        let mut query_builder = sqlx::QueryBuilder::new(
            "INSERT INTO weather_logs \
             (town, temperature, humidity, rainfall, rain_alert, mold_risk, alert, timestamp) ",
        );
        query_builder.push_values(readings, |mut b, d| {
            b.push_bind(&d.reading.location)
                .push_bind(d.reading.temperature)
                .push_bind(d.reading.humidity)
                .push_bind(d.reading.rainfall)
                .push_bind(d.rain_alert())
                .push_bind(d.mold_risk())
                .push_bind(d.alert())
                .push_bind(d.reading.observed_at);
        });
        query_builder.push(
            " RETURNING id, town, temperature, humidity, rainfall, \
             rain_alert, mold_risk, alert, timestamp",
        );

        let mut stored: Vec<StoredRecord> = query_builder
            .build_query_as::<StoredRecord>()
            .fetch_all(&mut *tx)
            .await?;

        // Dropping `tx` without commit rolls the whole batch back.
        tx.commit().await?;

        stored.sort_by_key(|r| r.id);
        debug!("Appended {} readings to weather_logs", stored.len());
        Ok(stored)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<StoredRecord>, StorageError> {
        // ---
        if limit <= 0 {
            return Ok(Vec::new());
        }

        let records = sqlx::query_as::<_, StoredRecord>(
            r#"
            SELECT id, town, temperature, humidity, rainfall,
                   rain_alert, mold_risk, alert, timestamp
            FROM weather_logs
            ORDER BY timestamp DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
