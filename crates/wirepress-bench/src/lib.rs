//! Benchmark core for Wirepress
//!
//! The [`runner::BenchmarkRunner`] measures one codec against one payload over
//! a real HTTP round-trip: it provisions an isolated ephemeral server, issues
//! a single request with compression negotiation forced on and transparent
//! decompression forced off, times the exchange, and tears the server down on
//! every exit path.
//!
//! The [`suite::BenchmarkSuite`] sequences the runner over a codec set,
//! best-effort: one codec's failure never aborts the rest.

pub mod reporter;
pub mod runner;
pub mod suite;

pub use reporter::render_table;
pub use runner::{BenchmarkRunner, CodecRunner};
pub use suite::BenchmarkSuite;
