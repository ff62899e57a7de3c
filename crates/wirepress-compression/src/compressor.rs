//! Core compression functionality

use bytes::Bytes;
use std::io::Write;
use wirepress_core::Codec;

/// Compressor for response bodies
pub struct Compressor;

impl Compressor {
    /// Compress data using the specified codec and level
    ///
    /// `Identity` is a passthrough: the input comes back unchanged.
    pub fn compress(data: &[u8], codec: Codec, level: u32) -> Result<Bytes, std::io::Error> {
        match codec {
            Codec::Gzip => Self::compress_gzip(data, level),
            Codec::Deflate => Self::compress_deflate(data, level),
            Codec::Brotli => Self::compress_brotli(data, level),
            Codec::Identity => Ok(Bytes::copy_from_slice(data)),
        }
    }

    /// Compress using gzip
    fn compress_gzip(data: &[u8], level: u32) -> Result<Bytes, std::io::Error> {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let compression_level = Compression::new(level.min(9));
        let mut encoder = GzEncoder::new(Vec::new(), compression_level);
        encoder.write_all(data)?;
        let compressed = encoder.finish()?;
        Ok(Bytes::from(compressed))
    }

    /// Compress using deflate
    ///
    /// The HTTP "deflate" coding is the zlib container, not raw deflate.
    fn compress_deflate(data: &[u8], level: u32) -> Result<Bytes, std::io::Error> {
        use flate2::write::ZlibEncoder;
        use flate2::Compression;

        let compression_level = Compression::new(level.min(9));
        let mut encoder = ZlibEncoder::new(Vec::new(), compression_level);
        encoder.write_all(data)?;
        let compressed = encoder.finish()?;
        Ok(Bytes::from(compressed))
    }

    /// Compress using brotli
    fn compress_brotli(data: &[u8], level: u32) -> Result<Bytes, std::io::Error> {
        let mut compressed = Vec::new();
        let quality = level.min(11);

        brotli::BrotliCompress(
            &mut std::io::Cursor::new(data),
            &mut compressed,
            &brotli::enc::BrotliEncoderParams {
                quality: quality as i32,
                ..Default::default()
            },
        )?;

        Ok(Bytes::from(compressed))
    }

    /// Negotiate a codec based on the request's Accept-Encoding header
    ///
    /// Returns the first offered codec the client accepts. `Identity` is never
    /// selected here: it means no content-coding is applied at all.
    pub fn negotiate(accept_encoding: Option<&str>, offered: &[Codec]) -> Option<Codec> {
        let accept = accept_encoding?;

        // Parse Accept-Encoding (e.g. "gzip, deflate;q=0.8, br")
        let accepted: Vec<&str> = accept
            .split(',')
            .map(|s| s.trim().split(';').next().unwrap_or("").trim())
            .collect();

        for &codec in offered {
            if codec == Codec::Identity {
                continue;
            }
            if accepted.contains(&codec.encoding_name()) {
                return Some(codec);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_text() -> String {
        "Hello, World! This is a test string that should compress well. ".repeat(100)
    }

    #[test]
    fn test_compress_gzip() {
        let data = sample_text();
        let compressed = Compressor::compress(data.as_bytes(), Codec::Gzip, 6).unwrap();
        assert!(compressed.len() < data.len());
    }

    #[test]
    fn test_compress_deflate() {
        let data = sample_text();
        let compressed = Compressor::compress(data.as_bytes(), Codec::Deflate, 6).unwrap();
        assert!(compressed.len() < data.len());
        // zlib magic byte
        assert_eq!(compressed[0], 0x78);
    }

    #[test]
    fn test_compress_brotli() {
        let data = sample_text();
        let compressed = Compressor::compress(data.as_bytes(), Codec::Brotli, 6).unwrap();
        assert!(compressed.len() < data.len());
    }

    #[test]
    fn test_identity_passthrough() {
        let data = b"unchanged bytes";
        let out = Compressor::compress(data, Codec::Identity, 6).unwrap();
        assert_eq!(&out[..], data);
    }

    #[test]
    fn test_deterministic_output() {
        let data = sample_text();
        for codec in Codec::all() {
            let a = Compressor::compress(data.as_bytes(), codec, 6).unwrap();
            let b = Compressor::compress(data.as_bytes(), codec, 6).unwrap();
            assert_eq!(a.len(), b.len(), "codec {} not deterministic", codec);
        }
    }

    #[test]
    fn test_negotiate() {
        // Client accepts the offered codec
        let codec = Compressor::negotiate(Some("gzip, br"), &[Codec::Brotli]);
        assert_eq!(codec, Some(Codec::Brotli));

        // q-values are ignored for matching
        let codec = Compressor::negotiate(Some("deflate;q=0.5"), &[Codec::Deflate]);
        assert_eq!(codec, Some(Codec::Deflate));

        // Client accepts nothing we offer
        let codec = Compressor::negotiate(Some("zstd"), &[Codec::Gzip]);
        assert_eq!(codec, None);

        // No Accept-Encoding header
        let codec = Compressor::negotiate(None, &[Codec::Gzip]);
        assert_eq!(codec, None);
    }

    #[test]
    fn test_negotiate_never_picks_unrequested_codec() {
        // Offering only C against an Accept-Encoding limited to C can never
        // select a different coding
        for codec in Codec::all() {
            let negotiated = Compressor::negotiate(Some(codec.encoding_name()), &[codec]);
            assert_eq!(negotiated, Some(codec));
        }
    }

    #[test]
    fn test_negotiate_identity_never_applied() {
        let codec = Compressor::negotiate(Some("identity"), &[Codec::Identity]);
        assert_eq!(codec, None);
    }
}
