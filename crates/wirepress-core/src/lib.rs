//! # Wirepress Core
//!
//! Core types, traits, and error handling for the Wirepress compression
//! benchmark.
//!
//! This crate provides the foundational abstractions used throughout the
//! benchmark:
//! - The codec identifier type
//! - The per-run measurement record
//! - Error types
//! - Human-readable formatting helpers

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod codec;
pub mod error;
pub mod format;
pub mod report;

pub use codec::Codec;
pub use error::{Error, Result};
pub use format::{format_bytes, format_duration};
pub use report::BenchmarkResult;

// Re-export commonly used types
pub use bytes::Bytes;
