//! File reading with a two-stage decoding fallback
//!
//! Content is decoded as UTF-8 first. Files containing invalid UTF-8 are
//! decoded as ISO-8859-1 (Latin-1), which maps every byte to the code point
//! of the same value and therefore accepts any input. Only a failure to read
//! the bytes themselves makes a file unreadable.

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::core::model::{DecodedText, ReadError, TextEncoding};

/// Decode raw bytes, falling back to Latin-1 on invalid UTF-8
pub fn decode_bytes(bytes: Vec<u8>) -> DecodedText {
    match String::from_utf8(bytes) {
        Ok(content) => DecodedText {
            content,
            encoding: TextEncoding::Utf8,
        },
        Err(err) => DecodedText {
            content: decode_latin1(err.as_bytes()),
            encoding: TextEncoding::Latin1,
        },
    }
}

/// Decode bytes as ISO-8859-1
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Read a file and decode it with the UTF-8 / Latin-1 fallback
pub fn read_with_fallback(path: &Path) -> Result<DecodedText, ReadError> {
    let bytes = fs::read(path).map_err(|source| ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    let decoded = decode_bytes(bytes);
    if decoded.encoding == TextEncoding::Latin1 {
        debug!(path = %path.display(), "invalid UTF-8, decoded as Latin-1");
    }
    Ok(decoded)
}
