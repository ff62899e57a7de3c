//! Payload acquisition for the Wirepress benchmark
//!
//! Tries remote text sources in priority order, each with a bounded timeout,
//! and falls back to a locally generated synthetic payload when every source
//! fails. Acquisition therefore never fails: the benchmark always gets a
//! non-empty, byte-stable payload to compress.

pub mod source;
pub mod synthetic;

pub use source::{PayloadProvider, TextSource};
pub use synthetic::synthetic_payload;
