//! Single-codec benchmark runs

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Instant;
use tracing::{debug, warn};
use wirepress_compression::CompressionConfig;
use wirepress_core::{BenchmarkResult, Codec, Error, Result};
use wirepress_server::EphemeralServer;

/// One benchmark invocation: one codec, one payload, one measurement
///
/// A trait seam so the orchestrator can be exercised with substitute runners
/// in tests.
#[async_trait]
pub trait CodecRunner: Send + Sync {
    /// Measure one codec against the payload
    async fn run(&self, codec: Codec, payload: &Bytes) -> Result<BenchmarkResult>;
}

/// The real runner: ephemeral server + timed HTTP round-trip
#[derive(Debug, Clone, Default)]
pub struct BenchmarkRunner {
    config: CompressionConfig,
}

impl BenchmarkRunner {
    /// Create a runner with the given compression settings
    pub fn new(config: CompressionConfig) -> Self {
        Self { config }
    }

    /// Issue the benchmarked request and build the measurement record
    ///
    /// The timer covers the full round-trip: it starts once the server is
    /// accepting and stops after the body has been read to the end. No
    /// timeout is applied - the round-trip is the quantity under test.
    async fn measure(
        &self,
        url: &str,
        codec: Codec,
        original_size: usize,
    ) -> Result<BenchmarkResult> {
        // Transparent decompression stays off: the compressed byte count on
        // the wire is the measured quantity.
        let client = reqwest::Client::builder()
            .no_gzip()
            .no_deflate()
            .no_brotli()
            .build()
            .map_err(|e| Error::Network(format!("Failed to build HTTP client: {}", e)))?;

        let started = Instant::now();

        let response = client
            .get(url)
            .header(reqwest::header::ACCEPT_ENCODING, codec.encoding_name())
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .header(reqwest::header::ACCEPT, "text/plain")
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();

        // Ground truth: what the server actually applied, not what we asked for
        let applied = response
            .headers()
            .get(reqwest::header::CONTENT_ENCODING)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("identity")
            .to_string();

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Network(format!("Body read failed: {}", e)))?;

        let elapsed = started.elapsed();

        if !status.is_success() {
            return Err(Error::Network(format!("Unexpected status {}", status)));
        }

        if applied != codec.encoding_name() {
            // Meaningful output, not a failure: the server declined to apply
            // the requested coding and the record says so.
            warn!(
                requested = codec.encoding_name(),
                applied = %applied,
                "Server applied a different content-encoding than requested"
            );
        }

        Ok(BenchmarkResult::new(
            applied,
            original_size,
            body.len(),
            elapsed,
        ))
    }
}

#[async_trait]
impl CodecRunner for BenchmarkRunner {
    async fn run(&self, codec: Codec, payload: &Bytes) -> Result<BenchmarkResult> {
        let server =
            EphemeralServer::start(codec, payload.clone(), self.config.clone()).await?;

        debug!(codec = %codec, addr = %server.addr(), "Benchmark run starting");

        let outcome = self.measure(&server.route_url(), codec, payload.len()).await;

        // Teardown on success and failure alike; the next run must find the
        // port released.
        server.shutdown().await;

        outcome
    }
}
