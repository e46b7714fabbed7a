//! UTF-16 framing with unpaired-surrogate tolerance.
//!
//! Stored payloads were written by an encoder that emits a byte-order
//! mark followed by little-endian code units, with unpaired surrogates
//! passed through unmodified. Decoding therefore accepts either BOM
//! (assuming little-endian when absent) and must not fail on a lone
//! surrogate: such units decode to U+FFFD, since a Rust string cannot
//! carry them.

use crate::CodecError;

const BOM: u16 = 0xFEFF;
const BOM_SWAPPED: u16 = 0xFFFE;

/// Encodes text as BOM-prefixed little-endian UTF-16.
pub(crate) fn encode(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(2 + text.len() * 2);
    bytes.extend_from_slice(&BOM.to_le_bytes());
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes
}

/// Decodes a UTF-16 byte stream, honoring a leading BOM.
pub(crate) fn decode(bytes: &[u8]) -> Result<String, CodecError> {
    if bytes.len() % 2 != 0 {
        return Err(CodecError::OddByteLength(bytes.len()));
    }

    let mut units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    match units.first() {
        Some(&BOM) => {
            units.remove(0);
        }
        // A swapped BOM means the stream is big-endian.
        Some(&BOM_SWAPPED) => {
            units.remove(0);
            for unit in &mut units {
                *unit = unit.swap_bytes();
            }
        }
        _ => {}
    }

    Ok(char::decode_utf16(units)
        .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect())
}
