use async_trait::async_trait;
use parking_lot::Mutex;

use super::ReadingStore;
use crate::error::StorageError;
use crate::models::{DerivedReading, StoredRecord};

#[derive(Debug, Default)]
struct Inner {
    records: Vec<StoredRecord>,
    last_id: i64,
}

/// Process-local store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryReadingStore {
    inner: Mutex<Inner>,
}

impl MemoryReadingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ReadingStore for MemoryReadingStore {
    async fn append(&self, readings: &[DerivedReading]) -> Result<Vec<StoredRecord>, StorageError> {
        // ---
        // One lock acquisition per batch keeps the batch atomic for readers.
        let mut inner = self.inner.lock();
        let first_id = inner.last_id + 1;

        let stored: Vec<StoredRecord> = readings
            .iter()
            .enumerate()
            .map(|(i, d)| StoredRecord::from_derived(first_id + i as i64, d))
            .collect();

        inner.last_id += stored.len() as i64;
        inner.records.extend(stored.iter().cloned());
        Ok(stored)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<StoredRecord>, StorageError> {
        // ---
        if limit <= 0 {
            return Ok(Vec::new());
        }

        let mut records = self.inner.lock().records.clone();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        records.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(records)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
