//! Error types for the Wirepress benchmark

/// Result type alias using [`Error`]
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Main error type for the Wirepress benchmark
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Ephemeral server could not bind a listener
    #[error("Failed to start ephemeral server: {0}")]
    ServerStart(String),

    /// Transport failure during the benchmarked request
    #[error("Network error: {0}")]
    Network(String),

    /// Response content-encoding did not match the requested codec
    #[error("Negotiation mismatch: requested '{requested}', server applied '{applied}'")]
    Negotiation {
        /// Content-coding the client advertised
        requested: String,
        /// Content-coding the server actually applied
        applied: String,
    },

    /// One upstream payload source failed
    #[error("Data fetch failed: {0}")]
    DataFetch(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] http::Error),

    /// Internal error (should not happen in production)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a negotiation mismatch error
    pub fn negotiation(requested: impl Into<String>, applied: impl Into<String>) -> Self {
        Error::Negotiation {
            requested: requested.into(),
            applied: applied.into(),
        }
    }
}
