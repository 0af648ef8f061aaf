//! Append-only persistence of derived readings.
//!
//! The store is the only shared mutable resource in the service and the sole
//! assigner of record ids. Two backends implement [`ReadingStore`]:
//! [`PgReadingStore`] for durable storage and [`MemoryReadingStore`] for
//! running without a database.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::{DerivedReading, StoredRecord};

mod memory;
mod postgres;

pub use memory::MemoryReadingStore;
pub use postgres::PgReadingStore;

#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// Persist a batch atomically: either every reading becomes visible or
    /// none does. Ids are strictly increasing in input order and each
    /// record keeps its observation time as `timestamp`.
    async fn append(&self, readings: &[DerivedReading]) -> Result<Vec<StoredRecord>, StorageError>;

    /// Up to `limit` records, newest `timestamp` first, ties broken by
    /// descending id. `limit <= 0` yields nothing.
    async fn recent(&self, limit: i64) -> Result<Vec<StoredRecord>, StorageError>;

    /// Short backend name reported by the health endpoint.
    fn backend_name(&self) -> &'static str;
}
