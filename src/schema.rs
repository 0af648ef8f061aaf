//! Database schema management for `weatherflow`.
//!
//! Ensures the `weather_logs` table and its indexes exist before serving
//! requests. Applied once on startup from `main.rs`.

use sqlx::PgPool;

use crate::error::StorageError;

// ---

/// Create the schema if missing (idempotent).
///
/// `weather_logs` is append-only: `id` orders writes, `timestamp` (the
/// provider's observation time) orders reads.
pub async fn create_schema(pool: &PgPool) -> Result<(), StorageError> {
    // ---
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS weather_logs (
            id          BIGSERIAL        PRIMARY KEY,
            town        TEXT             NOT NULL,
            temperature DOUBLE PRECISION NOT NULL,
            humidity    DOUBLE PRECISION NOT NULL,
            rainfall    DOUBLE PRECISION NOT NULL,
            rain_alert  BOOLEAN          NOT NULL,
            mold_risk   BOOLEAN          NOT NULL,
            alert       BOOLEAN          NOT NULL,
            timestamp   TIMESTAMPTZ      NOT NULL,
            CHECK (alert = (rain_alert OR mold_risk))
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_weather_logs_town
            ON weather_logs (town);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // Serves `ORDER BY timestamp DESC, id DESC LIMIT n`
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_weather_logs_recent
            ON weather_logs (timestamp DESC, id DESC);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}
