//! Playlist document store
//!
//! The whole collection of imported playlists is one document: read it,
//! overwrite it, or delete it. No queries.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use crate::errors::StoreError;
use crate::models::PlaylistRecord;

/// Durable collection of playlist records
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    /// Read the entire collection (empty when nothing was stored yet)
    async fn load_all(&self) -> Result<Vec<PlaylistRecord>, StoreError>;

    /// Overwrite the entire collection
    async fn save_all(&self, records: &[PlaylistRecord]) -> Result<(), StoreError>;

    /// Delete the entire collection
    async fn clear(&self) -> Result<(), StoreError>;
}

/// In-memory store, contents are lost on drop
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<Vec<PlaylistRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlaylistStore for MemoryStore {
    async fn load_all(&self) -> Result<Vec<PlaylistRecord>, StoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn save_all(&self, records: &[PlaylistRecord]) -> Result<(), StoreError> {
        *self.records.write().await = records.to_vec();
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.records.write().await.clear();
        Ok(())
    }
}

/// JSON document on disk at `<dir>/<key>.json`
#[derive(Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
    key: String,
}

impl JsonFileStore {
    /// Create the store, creating its directory if needed
    pub async fn new(dir: &str, key: &str) -> Result<Self, StoreError> {
        let dir = PathBuf::from(dir);
        fs::create_dir_all(&dir).await?;

        Ok(Self {
            dir,
            key: key.to_string(),
        })
    }

    fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }

    fn tmp_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json.tmp", self.key))
    }
}

#[async_trait]
impl PlaylistStore for JsonFileStore {
    async fn load_all(&self) -> Result<Vec<PlaylistRecord>, StoreError> {
        let data = match fs::read(self.path()).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let records: Vec<PlaylistRecord> = serde_json::from_slice(&data)?;
        Ok(records)
    }

    async fn save_all(&self, records: &[PlaylistRecord]) -> Result<(), StoreError> {
        let data = serde_json::to_vec(records)?;
        let tmp_path = self.tmp_path();

        // Write to temp file, then atomic rename
        let mut file = fs::File::create(&tmp_path).await?;
        file.write_all(&data).await?;
        file.flush().await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&tmp_path, self.path()).await?;

        tracing::debug!(store_key = %self.key, records = records.len(), "store saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(self.path()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaEntry;

    fn record(name: &str) -> PlaylistRecord {
        PlaylistRecord {
            name: name.to_string(),
            source_url: None,
            content: "#EXTINF:-1,A\nhttp://x/a".to_string(),
            items: vec![MediaEntry {
                id: "1".to_string(),
                name: "A".to_string(),
                url: "http://x/a".to_string(),
                main_category: "TV".to_string(),
                sub_category: None,
                tvg_id: None,
                tvg_name: None,
                tvg_logo: None,
                duration: Some(-1.0),
            }],
            created_at: chrono::Utc::now(),
        }
    }

    fn temp_dir() -> String {
        std::env::temp_dir()
            .join(format!("iptv-catalog-test-{}", uuid::Uuid::new_v4()))
            .to_string_lossy()
            .to_string()
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip_and_clear() {
        let store = MemoryStore::new();
        assert!(store.load_all().await.unwrap().is_empty());

        store.save_all(&[record("one"), record("two")]).await.unwrap();
        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].name, "two");

        store.clear().await.unwrap();
        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_store_missing_file_is_empty() {
        let dir = temp_dir();
        let store = JsonFileStore::new(&dir, "playlists").await.unwrap();
        assert!(store.load_all().await.unwrap().is_empty());

        // Clearing a store that was never written is fine
        store.clear().await.unwrap();
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_file_store_persists_across_instances() {
        let dir = temp_dir();
        let store = JsonFileStore::new(&dir, "playlists").await.unwrap();
        store.save_all(&[record("saved")]).await.unwrap();

        let reopened = JsonFileStore::new(&dir, "playlists").await.unwrap();
        let loaded = reopened.load_all().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0], store.load_all().await.unwrap()[0]);

        // Different key, different document
        let other = JsonFileStore::new(&dir, "other").await.unwrap();
        assert!(other.load_all().await.unwrap().is_empty());

        reopened.clear().await.unwrap();
        assert!(store.load_all().await.unwrap().is_empty());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_file_store_corrupt_document_is_error() {
        let dir = temp_dir();
        let store = JsonFileStore::new(&dir, "playlists").await.unwrap();
        fs::write(store.path(), b"not json").await.unwrap();

        let err = store.load_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
