//! Codec identifiers and content-coding tokens

use serde::{Deserialize, Serialize};
use std::fmt;

/// Compression codecs the benchmark can exercise
///
/// `Identity` is the no-compression control: the server applies no
/// content-coding for it and sends no `Content-Encoding` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    /// gzip (RFC 1952)
    Gzip,
    /// deflate, i.e. the zlib container (RFC 1950)
    Deflate,
    /// Brotli, token `br`
    Brotli,
    /// No compression (control run)
    Identity,
}

impl Codec {
    /// Get the content-coding token used in Accept-Encoding / Content-Encoding
    pub fn encoding_name(&self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
            Self::Deflate => "deflate",
            Self::Brotli => "br",
            Self::Identity => "identity",
        }
    }

    /// Parse a content-coding token
    pub fn from_encoding(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "gzip" => Some(Self::Gzip),
            "deflate" => Some(Self::Deflate),
            "br" | "brotli" => Some(Self::Brotli),
            "identity" | "none" => Some(Self::Identity),
            _ => None,
        }
    }

    /// The default codec set compared by the benchmark, in display order
    pub fn all() -> [Codec; 3] {
        [Self::Gzip, Self::Deflate, Self::Brotli]
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.encoding_name())
    }
}
