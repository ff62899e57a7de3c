//! Per-run measurement records

use serde::Serialize;
use std::time::Duration;

/// Measurement produced by one benchmark run
///
/// `algorithm` is the content-coding the server actually applied (echoed from
/// the response's Content-Encoding header), not the one the client requested.
/// The two can diverge when negotiation declines to compress; recording the
/// response header keeps the report truthful.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkResult {
    /// Content-coding actually applied by the server
    pub algorithm: String,

    /// Payload size before compression, in bytes
    pub original_size: usize,

    /// Bytes received on the wire
    pub compressed_size: usize,

    /// Fraction of the original eliminated, as a percentage
    pub ratio: f64,

    /// Bytes saved (negative when the payload expanded)
    pub savings: i64,

    /// Wall-clock time for the full request/response round-trip
    pub elapsed: Duration,
}

impl BenchmarkResult {
    /// Build a result, deriving ratio and savings from the raw sizes
    pub fn new(
        algorithm: impl Into<String>,
        original_size: usize,
        compressed_size: usize,
        elapsed: Duration,
    ) -> Self {
        let savings = original_size as i64 - compressed_size as i64;
        let ratio = if original_size == 0 {
            0.0
        } else {
            savings as f64 / original_size as f64 * 100.0
        };

        Self {
            algorithm: algorithm.into(),
            original_size,
            compressed_size,
            ratio,
            savings,
            elapsed,
        }
    }
}
