use chrono::Utc;
use lazy_static::lazy_static;
use prometheus::{register_int_counter, IntCounter};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::errors::{CatalogError, CatalogResult};
use crate::models::{CategoryView, MediaEntry, PlaylistRecord, StorageInfo};
use crate::services::aggregator;
use crate::services::fetcher::PlaylistFetcher;
use crate::services::m3u_parser;
use crate::services::store::PlaylistStore;

lazy_static! {
    static ref PLAYLISTS_IMPORTED: IntCounter =
        register_int_counter!("catalog_playlists_imported_total", "Playlists imported").unwrap();
    static ref ENTRIES_IMPORTED: IntCounter =
        register_int_counter!("catalog_entries_imported_total", "Media entries imported").unwrap();
    static ref IMPORT_FAILURES: IntCounter =
        register_int_counter!("catalog_import_failures_total", "Rejected playlist imports").unwrap();
}

const PLAYLIST_EXTENSIONS: [&str; 2] = ["m3u", "m3u8"];

/// Default name for playlists imported without one
fn default_playlist_name() -> String {
    format!("Playlist {}", Utc::now().format("%d/%m/%Y"))
}

/// Ingestion and query boundary over the playlist store
#[derive(Clone)]
pub struct PlaylistService {
    store: Arc<dyn PlaylistStore>,
    fetcher: Arc<dyn PlaylistFetcher>,
    /// Serializes read-modify-write cycles on the store
    write_lock: Arc<Mutex<()>>,
}

impl PlaylistService {
    pub fn new(store: Arc<dyn PlaylistStore>, fetcher: Arc<dyn PlaylistFetcher>) -> Self {
        Self {
            store,
            fetcher,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Parse and persist a playlist
    pub async fn add_playlist(
        &self,
        name: &str,
        content: &str,
        source_url: Option<&str>,
        force_category: Option<&str>,
    ) -> CatalogResult<PlaylistRecord> {
        let items = m3u_parser::parse(content, force_category);
        tracing::info!("Parsed {} entries from playlist content", items.len());

        if items.is_empty() {
            IMPORT_FAILURES.inc();
            return Err(CatalogError::EmptyPlaylist);
        }

        let name = match name.trim() {
            "" => default_playlist_name(),
            trimmed => trimmed.to_string(),
        };

        let record = PlaylistRecord {
            name,
            source_url: source_url.map(str::to_string),
            content: content.to_string(),
            items,
            created_at: Utc::now(),
        };

        {
            let _guard = self.write_lock.lock().await;
            let mut existing = self.store.load_all().await?;
            tracing::debug!("Playlists stored before append: {}", existing.len());
            existing.push(record.clone());
            self.store.save_all(&existing).await?;
        }

        PLAYLISTS_IMPORTED.inc();
        ENTRIES_IMPORTED.inc_by(record.items.len() as u64);
        tracing::info!(
            "Playlist '{}' saved with {} entries",
            record.name,
            record.items.len()
        );

        Ok(record)
    }

    /// Fetch a playlist over the network, then add it
    pub async fn import_from_url(
        &self,
        name: &str,
        url: &str,
        force_category: Option<&str>,
    ) -> CatalogResult<PlaylistRecord> {
        tracing::info!("Fetching playlist: {}", url);

        let content = self.fetcher.fetch(url).await.map_err(|e| {
            tracing::warn!("Failed to fetch playlist {}: {}", url, e);
            IMPORT_FAILURES.inc();
            CatalogError::Unreachable(e)
        })?;

        self.add_playlist(name, &content, Some(url), force_category)
            .await
    }

    /// Read a local .m3u/.m3u8 file, then add it
    pub async fn import_from_file(
        &self,
        path: &Path,
        name: Option<&str>,
        force_category: Option<&str>,
    ) -> CatalogResult<PlaylistRecord> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        if !PLAYLIST_EXTENSIONS.contains(&extension.as_str()) {
            return Err(CatalogError::InvalidFile(format!(
                "expected an M3U or M3U8 file, got {}",
                path.display()
            )));
        }

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            tracing::warn!("Failed to read playlist file {}: {}", path.display(), e);
            CatalogError::InvalidFile(e.to_string())
        })?;

        // File name without extension when no name is given
        let name = name
            .map(str::to_string)
            .or_else(|| path.file_stem().map(|s| s.to_string_lossy().to_string()))
            .unwrap_or_default();

        self.add_playlist(&name, &content, None, force_category)
            .await
    }

    /// All stored playlist records
    pub async fn get_playlists(&self) -> CatalogResult<Vec<PlaylistRecord>> {
        Ok(self.store.load_all().await?)
    }

    /// Category tree over every stored playlist
    pub async fn get_all_categories(&self) -> CatalogResult<Vec<CategoryView>> {
        let records = self.store.load_all().await?;
        Ok(aggregator::build_categories(&records))
    }

    /// Single main category by name
    pub async fn get_category(&self, name: &str) -> CatalogResult<CategoryView> {
        let categories = self.get_all_categories().await?;
        aggregator::find_category(&categories, name)
            .cloned()
            .ok_or_else(|| CatalogError::CategoryNotFound(name.to_string()))
    }

    /// Every stored entry, flat and unfiltered
    pub async fn export_all_entries(&self) -> CatalogResult<Vec<MediaEntry>> {
        let records = self.store.load_all().await?;
        Ok(records.into_iter().flat_map(|r| r.items).collect())
    }

    /// Entries whose name or category contains the query
    pub async fn search(&self, query: &str) -> CatalogResult<Vec<MediaEntry>> {
        let records = self.store.load_all().await?;
        let entries = records.iter().flat_map(|r| r.items.iter());
        Ok(aggregator::search_entries(entries, query))
    }

    pub async fn storage_info(&self) -> CatalogResult<StorageInfo> {
        let records = self.store.load_all().await?;
        Ok(aggregator::storage_info(&records))
    }

    /// Remove every stored playlist
    pub async fn clear_all_data(&self) -> CatalogResult<()> {
        let _guard = self.write_lock.lock().await;
        self.store.clear().await?;
        tracing::warn!("All playlists removed");
        Ok(())
    }
}
