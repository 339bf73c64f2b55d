/*!
 * Remote subtitle retrieval.
 *
 * The normalization core never touches the network. This module is the
 * collaborator that turns a URL into document text: the [`TextFetcher`]
 * trait, an HTTP implementation on reqwest with retry and exponential
 * backoff, and [`fetch_and_normalize`] which composes fetching with
 * [`crate::subtitle_processor::normalize`].
 */

use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::app_config::FetchConfig;
use crate::errors::FetchError;
use crate::subtitle_processor::{self, ParsedDocument, SubtitleFormat};

/// Anything that can return the full body of a document by URL
#[async_trait]
pub trait TextFetcher: Send + Sync {
    /// Fetch the complete document text
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP(S) fetcher backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    /// HTTP client for making requests
    client: Client,
    /// Retries after the first attempt
    max_retries: u32,
    /// Base backoff time in milliseconds, doubled on each retry
    backoff_base_ms: u64,
}

impl HttpFetcher {
    /// Create a fetcher from configuration
    pub fn new(config: &FetchConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .user_agent(config.user_agent.clone())
                .build()
                .unwrap_or_default(),
            max_retries: config.max_retries,
            backoff_base_ms: config.retry_backoff_ms,
        }
    }

    /// Reject anything that is not an absolute http(s) URL
    pub fn validate_url(url: &str) -> Result<Url, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;
        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            scheme => Err(FetchError::InvalidUrl(format!("unsupported scheme '{}' in {}", scheme, url))),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(&FetchConfig::default())
    }
}

#[async_trait]
impl TextFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let url = Self::validate_url(url)?;

        let mut attempt = 0;
        let mut last_error = None;

        while attempt <= self.max_retries {
            match self.client.get(url.clone()).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let body = response.text().await
                            .map_err(|e| FetchError::Body(e.to_string()))?;
                        debug!("Fetched {} bytes from {}", body.len(), url);
                        return Ok(body);
                    }

                    let message = response.text().await
                        .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown").to_string());
                    let http_error = FetchError::HttpStatus {
                        status_code: status.as_u16(),
                        message,
                    };

                    if status.is_server_error() {
                        // Server error - can retry
                        warn!("Subtitle server error ({}) - attempt {}/{}", status, attempt + 1, self.max_retries + 1);
                        last_error = Some(http_error);
                    } else {
                        // Client error - don't retry
                        error!("Subtitle request to {} failed: {}", url, http_error);
                        return Err(http_error);
                    }
                }
                Err(e) => {
                    // Network error - can retry
                    warn!("Subtitle request network error: {} - attempt {}/{}", e, attempt + 1, self.max_retries + 1);
                    last_error = Some(FetchError::RequestFailed(e.to_string()));
                }
            }

            attempt += 1;

            if attempt <= self.max_retries {
                let backoff_ms = backoff_delay_ms(self.backoff_base_ms, attempt);
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
            }
        }

        let err = last_error.unwrap_or_else(|| {
            FetchError::RequestFailed(format!("request failed after {} attempts", self.max_retries + 1))
        });
        error!("Giving up on {}: {}", url, err);
        Err(err)
    }
}

/// Delay before retry `attempt` (1-based): the base doubled per prior retry,
/// saturating at `u64::MAX`
pub fn backoff_delay_ms(base_ms: u64, attempt: u32) -> u64 {
    1u64.checked_shl(attempt.saturating_sub(1))
        .and_then(|multiplier| base_ms.checked_mul(multiplier))
        .unwrap_or(u64::MAX)
}

/// Fetch a document and normalize it in one step
pub async fn fetch_and_normalize<F>(fetcher: &F, url: &str, format: SubtitleFormat) -> Result<ParsedDocument, FetchError>
where
    F: TextFetcher + ?Sized,
{
    let body = fetcher.fetch_text(url).await?;
    Ok(subtitle_processor::normalize(&body, format))
}
