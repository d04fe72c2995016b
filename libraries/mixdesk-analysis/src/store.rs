/// In-memory metadata store
use async_trait::async_trait;
use mixdesk_core::{AudioMetadataRecord, AudioVersionId, MetadataStore, Result, StoredMetadata};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// `MetadataStore` backed by a map, for the CLI and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<AudioVersionId, StoredMetadata>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a version with existing (possibly partial) metadata
    pub async fn insert(&self, id: AudioVersionId, metadata: StoredMetadata) {
        self.records.write().await.insert(id, metadata);
    }

    /// Current metadata for a version
    pub async fn get(&self, id: &AudioVersionId) -> Option<StoredMetadata> {
        self.records.read().await.get(id).cloned()
    }

    /// Number of `update` calls so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataStore for MemoryStore {
    async fn load(&self, id: &AudioVersionId) -> Result<Option<StoredMetadata>> {
        Ok(self.get(id).await)
    }

    async fn update(&self, id: &AudioVersionId, record: &AudioMetadataRecord) -> Result<()> {
        self.records
            .write()
            .await
            .insert(id.clone(), StoredMetadata::from(record.clone()));
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixdesk_core::{AudioHeaderMeta, FileFormat};

    #[tokio::test]
    async fn update_overwrites_and_counts() {
        let store = MemoryStore::new();
        let id = AudioVersionId::new("v1");
        let record = AudioMetadataRecord::new(
            -14.0,
            44_100,
            AudioHeaderMeta {
                bit_depth: Some(16),
                file_format: FileFormat::Wav,
            },
        );

        assert_eq!(store.load(&id).await.unwrap(), None);
        store.update(&id, &record).await.unwrap();
        store.update(&id, &record).await.unwrap();

        let stored = store.get(&id).await.unwrap();
        assert!(stored.is_populated());
        assert_eq!(stored.bit_depth, Some(16));
        assert_eq!(store.write_count(), 2);
    }
}
