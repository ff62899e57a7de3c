//! Synthetic payload generation - the terminal fallback

use bytes::Bytes;

/// Sentence repeated to fill the payload; ordinary prose compresses the way
/// real text bodies do
const FILLER: &str = "Compression benchmarks need text that looks like text: \
words repeat, structure repeats, and entropy stays low enough for every \
codec to find something to squeeze. ";

/// Generate a payload of exactly `target_size` bytes of repetitive text
///
/// Cannot fail; a zero target yields an empty payload.
pub fn synthetic_payload(target_size: usize) -> Bytes {
    if target_size == 0 {
        return Bytes::new();
    }

    let repeats = target_size / FILLER.len() + 1;
    let mut text = FILLER.repeat(repeats).into_bytes();
    text.truncate(target_size);
    Bytes::from(text)
}
