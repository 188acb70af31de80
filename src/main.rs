use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use iptv_catalog::config::Config;
use iptv_catalog::services::{
    fetcher::HttpFetcher, playlist_service::PlaylistService, store::JsonFileStore,
};
use iptv_catalog::{build_router, AppState};

#[derive(Parser)]
#[command(name = "iptv-catalog")]
#[command(about = "IPTV playlist catalog server")]
#[command(long_about = None)]
struct Cli {
    /// Local .m3u/.m3u8 file to import before serving (repeatable)
    #[arg(short, long = "import", value_name = "FILE")]
    import: Vec<PathBuf>,

    /// Main category applied to every entry of the imported files
    #[arg(short, long, value_name = "CATEGORY")]
    force_category: Option<String>,

    /// Listening port (overrides PORT)
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iptv_catalog=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Load configuration
    let mut config = Config::from_env();
    if let Some(port) = cli.port {
        config.port = port;
    }
    let port = config.port;

    tracing::info!("Starting IPTV Catalog v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.node_env);

    // Playlist store on disk
    let store = JsonFileStore::new(&config.store_dir, &config.store_key).await?;
    tracing::info!("Playlist store initialized: {}", config.store_dir);

    let fetcher = HttpFetcher::from_config(&config)?;
    let service = PlaylistService::new(Arc::new(store), Arc::new(fetcher));

    // Startup imports; a bad file does not keep the server from starting
    for path in &cli.import {
        match service
            .import_from_file(path, None, cli.force_category.as_deref())
            .await
        {
            Ok(record) => tracing::info!(
                "Imported '{}' from {} ({} entries)",
                record.name,
                path.display(),
                record.items.len()
            ),
            Err(e) => tracing::error!("Failed to import {}: {}", path.display(), e),
        }
    }

    let state = Arc::new(AppState::new(config, service));
    let app = build_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_collects_import_files() {
        let cli = Cli::try_parse_from([
            "iptv-catalog",
            "--import",
            "a.m3u",
            "-i",
            "b.m3u8",
            "--force-category",
            "Movies",
        ])
        .unwrap();

        assert_eq!(cli.import, vec![PathBuf::from("a.m3u"), PathBuf::from("b.m3u8")]);
        assert_eq!(cli.force_category.as_deref(), Some("Movies"));
        assert_eq!(cli.port, None);
    }
}
