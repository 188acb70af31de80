use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::media::MediaEntry;

/// One imported playlist, stored as-is after import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Original playlist text, kept for export
    pub content: String,
    pub items: Vec<MediaEntry>,
    pub created_at: DateTime<Utc>,
}

/// Entries of one subcategory inside a main category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryView {
    pub name: String,
    pub count: usize,
    pub items: Vec<MediaEntry>,
}

/// Main category with all of its entries and subcategories
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    pub name: String,
    pub count: usize,
    pub items: Vec<MediaEntry>,
    pub subcategories: BTreeMap<String, SubcategoryView>,
}

/// Storage summary (settings screen)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageInfo {
    pub total_playlists: usize,
    pub total_categories: usize,
    pub total_items: usize,
}

/// Stored playlist without its raw content and entries
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub item_count: usize,
    pub created_at: DateTime<Utc>,
}

impl From<&PlaylistRecord> for PlaylistSummary {
    fn from(record: &PlaylistRecord) -> Self {
        Self {
            name: record.name.clone(),
            source_url: record.source_url.clone(),
            item_count: record.items.len(),
            created_at: record.created_at,
        }
    }
}

/// Request to import a playlist, either from pasted text or from a URL
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPlaylistRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Main category applied to every entry of this playlist
    #[serde(default)]
    pub force_category: Option<String>,
}

/// Import response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPlaylistResponse {
    pub success: bool,
    pub playlist: PlaylistSummary,
}

/// Categories response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryView>,
    pub total: usize,
}

/// Flat entry list response (export and search)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntriesResponse {
    pub items: Vec<MediaEntry>,
    pub total: usize,
}

/// Stored playlists response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistsResponse {
    pub playlists: Vec<PlaylistSummary>,
    pub total: usize,
}

/// Query parameters for the search endpoint
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}
