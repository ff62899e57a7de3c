//! Benchmark orchestration across the codec set

use crate::runner::{BenchmarkRunner, CodecRunner};
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, warn};
use wirepress_core::{BenchmarkResult, Codec};
use wirepress_provider::PayloadProvider;

/// Sequences benchmark runs over a codec set
///
/// The payload is acquired once and shared read-only across runs so every
/// codec compresses byte-identical input. Runs are strictly sequential: run
/// N+1 starts only after run N's server has released its port and its record
/// has been collected, keeping at most one live listener and one timer at any
/// moment.
pub struct BenchmarkSuite {
    provider: PayloadProvider,
    runner: Arc<dyn CodecRunner>,
}

impl fmt::Debug for BenchmarkSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BenchmarkSuite")
            .field("provider", &self.provider)
            .finish()
    }
}

impl BenchmarkSuite {
    /// Create a suite with the default runner
    pub fn new(provider: PayloadProvider) -> Self {
        Self::with_runner(provider, Arc::new(BenchmarkRunner::default()))
    }

    /// Create a suite with a custom runner
    pub fn with_runner(provider: PayloadProvider, runner: Arc<dyn CodecRunner>) -> Self {
        Self { provider, runner }
    }

    /// Benchmark each codec in order, best-effort
    ///
    /// A failed codec is logged and skipped; the remaining codecs still run.
    /// Result order matches the input order, minus failures.
    pub async fn compare(&self, codecs: &[Codec]) -> Vec<BenchmarkResult> {
        let payload = self.provider.fetch_payload().await;

        info!(
            payload_size = payload.len(),
            codecs = codecs.len(),
            "Benchmark suite starting"
        );

        let mut results = Vec::with_capacity(codecs.len());

        for &codec in codecs {
            match self.runner.run(codec, &payload).await {
                Ok(result) => {
                    info!(
                        codec = %codec,
                        algorithm = %result.algorithm,
                        compressed_size = result.compressed_size,
                        elapsed_ms = result.elapsed.as_secs_f64() * 1000.0,
                        "Codec benchmarked"
                    );
                    results.push(result);
                }
                Err(e) => {
                    error!(codec = %codec, error = %e, "Codec benchmark failed, continuing");
                }
            }
        }

        if results.is_empty() && !codecs.is_empty() {
            warn!("All codec benchmarks failed");
        }

        results
    }
}
