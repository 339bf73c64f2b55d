/*!
 * In-memory fetchers for exercising the fetch boundary without a network.
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use subnorm::errors::FetchError;
use subnorm::fetch::TextFetcher;

/// Serves fixed bodies by URL and counts requests
#[derive(Debug, Default)]
pub struct MockFetcher {
    documents: HashMap<String, String>,
    requests: AtomicUsize,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a body for a URL
    pub fn with_document(mut self, url: &str, body: &str) -> Self {
        self.documents.insert(url.to_string(), body.to_string());
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextFetcher for MockFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::HttpStatus {
                status_code: 404,
                message: format!("no document at {}", url),
            })
    }
}
