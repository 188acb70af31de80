use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,
    pub node_env: String,

    // Store
    pub store_dir: String,
    pub store_key: String,

    // Fetching
    pub fetch_timeout_ms: u64,
    pub max_retries: u32,
    pub max_m3u_size_mb: usize,

    // Misc
    pub user_agent: String,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            // Server
            port: env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .unwrap_or(3001),
            node_env: env::var("NODE_ENV").unwrap_or_else(|_| "development".to_string()),

            // Store
            store_dir: env::var("STORE_DIR").unwrap_or_else(|_| ".catalog-data".to_string()),
            store_key: env::var("STORE_KEY").unwrap_or_else(|_| "playlists".to_string()),

            // Fetching
            fetch_timeout_ms: env::var("FETCH_TIMEOUT_MS")
                .unwrap_or_else(|_| "60000".to_string())
                .parse()
                .unwrap_or(60_000), // 1 minute

            max_retries: env::var("MAX_RETRIES")
                .unwrap_or_else(|_| "2".to_string())
                .parse()
                .unwrap_or(2),

            max_m3u_size_mb: env::var("MAX_M3U_SIZE_MB")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .unwrap_or(100),

            // Misc - Use VLC user agent to avoid IPTV server blocks
            user_agent: env::var("USER_AGENT")
                .unwrap_or_else(|_| "VLC/3.0.20 LibVLC/3.0.20".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
