use serde::{Deserialize, Serialize};

/// Main category labels produced by the classifier.
///
/// Kept as plain strings on [`MediaEntry`] so new labels can be introduced
/// without a schema change in stored playlists.
pub mod category {
    pub const TV: &str = "TV";
    pub const MOVIES: &str = "Movies";
    pub const SERIES: &str = "Series";
    pub const OTHER: &str = "Other";

    /// Bucket for entries stored without a main category
    pub const UNCATEGORIZED: &str = "Sem categoria";
    /// Bucket for entries without a subcategory
    pub const GENERAL: &str = "Geral";
}

fn default_main_category() -> String {
    category::OTHER.to_string()
}

/// Single playable stream (channel/movie/episode)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaEntry {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default = "default_main_category")]
    pub main_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tvg_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tvg_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tvg_logo: Option<String>,
    /// Stream duration in seconds, `-1` for live streams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl MediaEntry {
    /// True when the entry advertises a live/unknown duration
    pub fn is_live(&self) -> bool {
        self.duration.map_or(false, |d| d < 0.0)
    }
}

/// Result of classifying a group-title label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub main: String,
    pub sub: Option<String>,
}

impl Classification {
    pub fn new(main: impl Into<String>, sub: Option<String>) -> Self {
        Self {
            main: main.into(),
            sub,
        }
    }

    pub fn other() -> Self {
        Self::new(category::OTHER, None)
    }

    pub fn is_other(&self) -> bool {
        self.main == category::OTHER
    }
}

impl Default for Classification {
    fn default() -> Self {
        Self::other()
    }
}
