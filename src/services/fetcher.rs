use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::Config;
use crate::errors::FetchError;

/// Retrieves playlist text from a URL
#[async_trait]
pub trait PlaylistFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP fetcher with retry on rate limiting and network errors
pub struct HttpFetcher {
    client: Client,
    max_retries: u32,
    max_m3u_size_mb: usize,
}

impl HttpFetcher {
    pub fn new(
        user_agent: &str,
        timeout_ms: u64,
        max_retries: u32,
        max_m3u_size_mb: usize,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_millis(timeout_ms))
            .gzip(true)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            max_retries,
            max_m3u_size_mb,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(
            &config.user_agent,
            config.fetch_timeout_ms,
            config.max_retries,
            config.max_m3u_size_mb,
        )
    }

    fn max_bytes(&self) -> u64 {
        (self.max_m3u_size_mb as u64) * 1024 * 1024
    }

    fn check_size(&self, len: u64) -> Result<(), FetchError> {
        if len > self.max_bytes() {
            return Err(FetchError::TooLarge {
                size_mb: len as f64 / 1024f64 / 1024f64,
                limit_mb: self.max_m3u_size_mb,
            });
        }
        Ok(())
    }
}

/// Exponential backoff: 500ms, 1s, 2s, ... capped at 10s
fn backoff_ms(attempt: u32) -> u64 {
    (1u64 << attempt.min(20)).saturating_mul(500).min(10_000)
}

/// Only http(s) URLs can be fetched
fn validate_url(raw: &str) -> Result<url::Url, FetchError> {
    let parsed = url::Url::parse(raw.trim()).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::InvalidUrl(format!("unsupported scheme: {}", other))),
    }
}

#[async_trait]
impl PlaylistFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let url = validate_url(url)?;
        let mut attempt = 0u32;

        loop {
            match self.client.get(url.clone()).send().await {
                Ok(resp) => {
                    let status = resp.status();

                    if status.is_success() {
                        if let Some(len) = resp.content_length() {
                            self.check_size(len)?;
                        }
                        let body = resp.text().await?;
                        self.check_size(body.len() as u64)?;
                        return Ok(body);
                    }

                    if status == StatusCode::TOO_MANY_REQUESTS && attempt < self.max_retries {
                        let backoff = backoff_ms(attempt);
                        tracing::warn!("fetch_retry" = attempt + 1, "reason" = "429", "backoff_ms" = backoff);
                        sleep(Duration::from_millis(backoff)).await;
                        attempt += 1;
                        continue;
                    }

                    return Err(FetchError::Http(status.as_u16()));
                }
                Err(err) => {
                    if attempt < self.max_retries && (err.is_timeout() || err.is_connect()) {
                        let backoff = backoff_ms(attempt);
                        tracing::warn!("fetch_retry" = attempt + 1, "reason" = "network", "backoff_ms" = backoff);
                        sleep(Duration::from_millis(backoff)).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(err.into());
                }
            }
        }
    }
}
