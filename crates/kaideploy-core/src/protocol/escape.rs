//! Bytewise chunk escaper.
//!
//! Upload chunks travel as JSON string literals in which every input byte
//! stands for one character. This is not UTF-8 aware: bytes >= 0x7f are
//! always written as `\u00xx`, never as raw multi-byte sequences.

use serde_json::value::RawValue;

use crate::error::{ProtocolError, Result};

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Escape `bytes` into a double-quoted JSON string literal.
///
/// Output is at most `6 * bytes.len() + 2` bytes long.
pub fn escape_chunk(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 2);
    out.push('"');
    for &b in bytes {
        match b {
            0x08 => out.push_str("\\b"),
            b'\t' => out.push_str("\\t"),
            b'\n' => out.push_str("\\n"),
            0x0c => out.push_str("\\f"),
            b'\r' => out.push_str("\\r"),
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            0x20..=0x7e => out.push(char::from(b)),
            _ => {
                out.push_str("\\u00");
                out.push(char::from(HEX[usize::from(b >> 4)]));
                out.push(char::from(HEX[usize::from(b & 0x0f)]));
            }
        }
    }
    out.push('"');
    out
}

/// Escape `bytes` into a `RawValue` so serialization emits it verbatim.
pub fn chunk_literal(bytes: &[u8]) -> Result<Box<RawValue>> {
    RawValue::from_string(escape_chunk(bytes))
        .map_err(|e| ProtocolError::MalformedJson(format!("chunk literal: {e}")).into())
}
