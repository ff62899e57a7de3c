//! Prioritized remote text sources with catch-and-continue fallback

use crate::synthetic::synthetic_payload;
use bytes::Bytes;
use std::time::Duration;
use tracing::{debug, info, warn};
use wirepress_core::{Error, Result};

/// One remote text source
#[derive(Debug, Clone)]
pub struct TextSource {
    /// Short name for logs
    pub name: String,
    /// URL serving plain text
    pub url: String,
    /// Bound on this source's fetch attempt
    pub timeout: Duration,
}

impl TextSource {
    /// Create a source with the default 10-second timeout
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Override the fetch timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Supplies the benchmark payload
///
/// Sources are attempted in order; any failure advances to the next. When all
/// sources are exhausted the provider generates a synthetic payload locally,
/// so acquisition always succeeds.
#[derive(Debug, Clone)]
pub struct PayloadProvider {
    sources: Vec<TextSource>,
    fallback_size: usize,
}

impl PayloadProvider {
    /// Create a provider over the given sources
    pub fn new(sources: Vec<TextSource>, fallback_size: usize) -> Self {
        Self {
            sources,
            fallback_size,
        }
    }

    /// Create a provider that skips fetching and always generates locally
    pub fn synthetic(fallback_size: usize) -> Self {
        Self::new(Vec::new(), fallback_size)
    }

    /// Default public-domain text sources, largest-first
    pub fn default_sources() -> Vec<TextSource> {
        vec![
            TextSource::new("norvig-big", "https://norvig.com/big.txt"),
            TextSource::new(
                "gutenberg-frankenstein",
                "https://www.gutenberg.org/cache/epub/84/pg84.txt",
            ),
        ]
    }

    /// Acquire the payload
    ///
    /// Never fails: exhausting every source falls through to the synthetic
    /// generator.
    pub async fn fetch_payload(&self) -> Bytes {
        for source in &self.sources {
            match self.fetch(source).await {
                Ok(body) if !body.is_empty() => {
                    info!(
                        source = %source.name,
                        size = body.len(),
                        "Payload fetched"
                    );
                    return body;
                }
                Ok(_) => {
                    warn!(source = %source.name, "Source returned an empty body, trying next");
                }
                Err(e) => {
                    warn!(source = %source.name, error = %e, "Source failed, trying next");
                }
            }
        }

        info!(
            size = self.fallback_size,
            "All sources exhausted, generating synthetic payload"
        );
        synthetic_payload(self.fallback_size)
    }

    /// Fetch one source within its timeout
    async fn fetch(&self, source: &TextSource) -> Result<Bytes> {
        debug!(source = %source.name, url = %source.url, "Fetching payload source");

        let client = reqwest::Client::builder()
            .timeout(source.timeout)
            .build()
            .map_err(|e| Error::DataFetch(format!("Failed to build HTTP client: {}", e)))?;

        let response = client
            .get(&source.url)
            .send()
            .await
            .map_err(|e| Error::DataFetch(format!("{}: {}", source.url, e)))?;

        if !response.status().is_success() {
            return Err(Error::DataFetch(format!(
                "{}: unexpected status {}",
                source.url,
                response.status()
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| Error::DataFetch(format!("{}: body read failed: {}", source.url, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_synthetic_provider() {
        let provider = PayloadProvider::synthetic(8192);
        let payload = provider.fetch_payload().await;
        assert_eq!(payload.len(), 8192);
    }

    #[tokio::test]
    async fn test_unreachable_sources_fall_back() {
        // Nothing listens on port 9; both attempts must fail fast and fall
        // through to the generator.
        let sources = vec![
            TextSource::new("dead-1", "http://127.0.0.1:9/a")
                .with_timeout(Duration::from_millis(500)),
            TextSource::new("dead-2", "http://127.0.0.1:9/b")
                .with_timeout(Duration::from_millis(500)),
        ];

        let provider = PayloadProvider::new(sources, 4096);
        let payload = provider.fetch_payload().await;
        assert_eq!(payload.len(), 4096);
    }

    #[test]
    fn test_default_sources_ordering() {
        let sources = PayloadProvider::default_sources();
        assert!(!sources.is_empty());
        assert_eq!(sources[0].name, "norvig-big");
    }
}
