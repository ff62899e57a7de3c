//! Configuration for the benchmark's compression behavior

use serde::{Deserialize, Serialize};

/// Compression configuration for an ephemeral server
///
/// The benchmark deliberately forces both filters open: `min_size` is zero so
/// compression is never skipped for small bodies, and `compress_all_types`
/// bypasses the content-type filter so every payload compresses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    /// Compression level (1-9 for gzip/deflate, 1-11 for brotli)
    #[serde(default = "default_level")]
    pub level: u32,

    /// Minimum response size to compress (in bytes)
    #[serde(default)]
    pub min_size: usize,

    /// Compress every content type, ignoring the text-based filter
    #[serde(default = "default_compress_all_types")]
    pub compress_all_types: bool,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            level: 6,
            min_size: 0,
            compress_all_types: true,
        }
    }
}

fn default_level() -> u32 {
    6
}

fn default_compress_all_types() -> bool {
    true
}

impl CompressionConfig {
    /// Check if compression should be applied based on content size
    pub fn should_compress(&self, size: usize) -> bool {
        size >= self.min_size
    }

    /// Check if a content type should be compressed
    pub fn is_compressible_content_type(&self, content_type: &str) -> bool {
        if self.compress_all_types {
            return true;
        }

        let ct = content_type.to_lowercase();

        // Text-based content types that benefit from compression
        ct.starts_with("text/")
            || ct.contains("json")
            || ct.contains("xml")
            || ct.contains("javascript")
    }
}
