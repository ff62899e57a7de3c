//! Compression codecs for the Wirepress benchmark
//!
//! Provides the content-codings the ephemeral servers can apply:
//! - gzip (widely supported)
//! - deflate (zlib container)
//! - brotli (better compression, modern browsers)
//!
//! Features:
//! - Accept-Encoding negotiation
//! - Fixed, configurable compression level (deterministic output size)
//! - Size threshold and content-type filter, both forced open by the
//!   benchmark so compression is applied unconditionally

pub mod compressor;
pub mod config;

pub use compressor::Compressor;
pub use config::CompressionConfig;
