//! The upload queue: one [`ImageRecord`] per selected file, keyed by
//! identity and kept in insertion order.
//!
//! Every mutation of an existing record goes through
//! [`UploadQueue::update`], a replace-if-present on a single identity.
//! Concurrent pipeline completions therefore never touch each other's
//! records, and a completion for a record that was removed mid-flight is a
//! no-op.

use std::sync::Arc;

use indexmap::IndexMap;
use laparis_core::naming::display_name;
use laparis_core::types::{ImageId, ImageRecord, SourceRef};
use tokio::sync::RwLock;

/// A file selection to be queued.
#[derive(Debug, Clone)]
pub struct NewUpload {
    pub source: SourceRef,
    /// Display name; derived from the source's file name when `None`.
    pub name: Option<String>,
}

impl NewUpload {
    pub fn from_source(source: SourceRef) -> Self {
        Self { source, name: None }
    }

    fn into_record(self) -> ImageRecord {
        let name = self.name.unwrap_or_else(|| {
            self.source
                .file_name()
                .map(|file_name| display_name(&file_name))
                .unwrap_or_default()
        });
        ImageRecord::new(self.source, name)
    }
}

/// Shared handle to the queue. Clones point at the same records.
#[derive(Clone, Default)]
pub struct UploadQueue {
    records: Arc<RwLock<IndexMap<ImageId, ImageRecord>>>,
}

impl UploadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one pending record per upload. Duplicates are not detected;
    /// the same file queued twice yields two independent records.
    pub async fn add_batch(&self, uploads: impl IntoIterator<Item = NewUpload>) -> Vec<ImageId> {
        let new_records: Vec<ImageRecord> =
            uploads.into_iter().map(NewUpload::into_record).collect();
        self.insert_records(new_records).await
    }

    /// Append pre-built records as-is.
    pub async fn insert_records(&self, new_records: Vec<ImageRecord>) -> Vec<ImageId> {
        let mut records = self.records.write().await;
        new_records
            .into_iter()
            .map(|record| {
                let id = record.id.clone();
                records.insert(id.clone(), record);
                id
            })
            .collect()
    }

    /// Drop a record. Returns whether it was present. In-flight processing
    /// for the record is not cancelled.
    pub async fn remove(&self, id: &ImageId) -> bool {
        self.records.write().await.shift_remove(id).is_some()
    }

    pub async fn get(&self, id: &ImageId) -> Option<ImageRecord> {
        self.records.read().await.get(id).cloned()
    }

    /// All records in insertion order.
    pub async fn snapshot(&self) -> Vec<ImageRecord> {
        self.records.read().await.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Move every pending or failed record to processing and return the
    /// claimed records in queue order.
    ///
    /// All records are claimed under one write lock, so a record is handed
    /// out at most once until it reaches a terminal status again.
    pub async fn claim_eligible(&self) -> Vec<ImageRecord> {
        let mut records = self.records.write().await;
        records
            .values_mut()
            .filter(|r| r.status.is_eligible())
            .map(|r| {
                r.begin_processing();
                r.clone()
            })
            .collect()
    }

    /// Apply `transform` to the record with `id` if it is still queued.
    ///
    /// Returns the updated record, or `None` when the identity is absent
    /// (in which case nothing changes).
    pub async fn update<F>(&self, id: &ImageId, transform: F) -> Option<ImageRecord>
    where
        F: FnOnce(&mut ImageRecord),
    {
        let mut records = self.records.write().await;
        let record = records.get_mut(id)?;
        transform(record);
        Some(record.clone())
    }
}
