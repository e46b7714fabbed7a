//! Compressed snapshot payload codec.
//!
//! Recorded event batches are persisted as a compressed, text-serialized
//! representation: the batch is JSON-encoded, the text encoded as UTF-16
//! (with unpaired-surrogate tolerance), gzip-compressed, and the result
//! base64-armored for storage and transport. This crate implements both
//! directions of that format.
//!
//! A payload that fails any decoding stage surfaces as a [`CodecError`];
//! it is never silently replaced with empty data, since downstream
//! segment timings are derived from the decoded events.

use std::io::{Read, Write};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use serde_json::Value;
use thiserror::Error;

mod utf16;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("gzip failure: {0}")]
    Gzip(#[from] std::io::Error),

    /// The decompressed stream cannot be UTF-16: code units are two bytes.
    #[error("UTF-16 stream has an odd byte length: {0}")]
    OddByteLength(usize),

    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Compresses a JSON text into its stored representation.
pub fn compress_to_string(json_text: &str) -> Result<String, CodecError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&utf16::encode(json_text))?;
    let compressed = encoder.finish()?;
    Ok(STANDARD.encode(compressed))
}

/// Decodes a stored payload back to its JSON text.
pub fn decompress(base64_data: &str) -> Result<String, CodecError> {
    let compressed = STANDARD.decode(base64_data)?;
    let mut bytes = Vec::new();
    GzDecoder::new(compressed.as_slice()).read_to_end(&mut bytes)?;
    utf16::decode(&bytes)
}

/// Encodes an event batch for storage.
pub fn encode_events(events: &[Value]) -> Result<String, CodecError> {
    compress_to_string(&serde_json::to_string(events)?)
}

/// Decodes a stored payload into its event batch.
pub fn decode_events(base64_data: &str) -> Result<Vec<Value>, CodecError> {
    Ok(serde_json::from_str(&decompress(base64_data)?)?)
}
