//! Ephemeral HTTP servers for the Wirepress benchmark
//!
//! Each benchmark run provisions one throwaway listener on a random ephemeral
//! port, serving a single `GET /test` route that negotiates and applies
//! exactly one compression codec. The listener lives for the duration of one
//! run and releases its port on every exit path.

pub mod server;
pub mod shutdown;

pub use server::{EphemeralServer, ServerHandle, BENCHMARK_ROUTE};
pub use shutdown::ShutdownSignal;
