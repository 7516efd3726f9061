//! Length-prefixed JSON frames (panic-free).
//!
//! Wire shape: ASCII decimal length, one `:` byte, then exactly that many
//! bytes of JSON. Nothing trails the payload.
//!
//! Parsing rules:
//! - Never index into the buffer; split with `Buf` after `remaining()` checks.
//! - The treatment of a malformed length prefix is an explicit `LengthPolicy`.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use crate::error::{DeployError, ProtocolError, Result};
use crate::protocol::reply::Reply;

/// Separates the length prefix from the payload.
pub const DELIMITER: u8 = b':';

/// Default ceiling for a declared inbound frame length (16 MiB).
pub const DEFAULT_MAX_FRAME_BYTES: usize = 16 * 1024 * 1024;

/// Default longest length prefix, delimiter included.
pub const DEFAULT_MAX_PREFIX_BYTES: usize = 32;

/// How to read a length prefix that is not a decimal number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthPolicy {
    /// Read it as length 0, matching the device tooling this client talks to.
    /// The occurrence is still logged at `warn`.
    #[default]
    Lenient,
    /// Reject it with `ProtocolError::BadLength`.
    Strict,
}

/// Inbound frame constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLimits {
    pub policy: LengthPolicy,
    pub max_frame_bytes: usize,
    /// The delimiter must appear within this many bytes.
    pub max_prefix_bytes: usize,
}

impl Default for FrameLimits {
    fn default() -> Self {
        Self {
            policy: LengthPolicy::default(),
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
            max_prefix_bytes: DEFAULT_MAX_PREFIX_BYTES,
        }
    }
}

/// Parse a length prefix (delimiter excluded).
pub fn parse_length(prefix: &[u8], limits: &FrameLimits) -> Result<usize> {
    let parsed = std::str::from_utf8(prefix)
        .ok()
        .and_then(|s| s.parse::<usize>().ok());

    let len = match (parsed, limits.policy) {
        (Some(n), _) => n,
        (None, LengthPolicy::Lenient) => {
            tracing::warn!(
                prefix = %String::from_utf8_lossy(prefix),
                "malformed frame length prefix, reading as 0"
            );
            0
        }
        (None, LengthPolicy::Strict) => {
            return Err(ProtocolError::BadLength(String::from_utf8_lossy(prefix).into_owned()).into());
        }
    };

    if len > limits.max_frame_bytes {
        return Err(ProtocolError::FrameTooLarge {
            len,
            max: limits.max_frame_bytes,
        }
        .into());
    }
    Ok(len)
}

/// Encode a message as one complete frame.
///
/// The result is a single buffer so callers can hand it to one write.
pub fn encode_frame<T: Serialize + ?Sized>(msg: &T) -> Result<Bytes> {
    let json = serde_json::to_vec(msg)
        .map_err(|e| ProtocolError::MalformedJson(format!("encode failed: {e}")))?;
    let len = json.len().to_string();

    let mut buf = BytesMut::with_capacity(len.len() + 1 + json.len());
    buf.put_slice(len.as_bytes());
    buf.put_u8(DELIMITER);
    buf.put_slice(&json);
    Ok(buf.freeze())
}

/// Parse a frame payload into a reply.
pub fn decode_payload(payload: &[u8]) -> Result<Reply> {
    let value = serde_json::from_slice(payload)
        .map_err(|e| ProtocolError::MalformedJson(e.to_string()))?;
    Ok(Reply::new(value))
}

/// Decode one frame from the front of a complete buffer.
///
/// Returns the reply and whatever follows the frame. A buffer that ends
/// before the delimiter or before the declared length is an
/// `UnexpectedEof` I/O error, the same as a stream closing mid-frame.
pub fn decode_frame(mut buf: Bytes, limits: &FrameLimits) -> Result<(Reply, Bytes)> {
    let window = buf.len().min(limits.max_prefix_bytes);
    let Some(pos) = buf.iter().take(window).position(|b| *b == DELIMITER) else {
        if window == limits.max_prefix_bytes {
            return Err(missing_delimiter(limits));
        }
        return Err(eof("buffer ended before length delimiter"));
    };

    let prefix = buf.split_to(pos);
    buf.advance(1);

    let len = parse_length(&prefix, limits)?;
    if buf.remaining() < len {
        return Err(eof("buffer ended before declared frame length"));
    }

    let payload = buf.split_to(len);
    let reply = decode_payload(&payload)?;
    Ok((reply, buf))
}

/// Error for a prefix that runs past `max_prefix_bytes` without a delimiter.
pub fn missing_delimiter(limits: &FrameLimits) -> DeployError {
    ProtocolError::BadLength(format!(
        "no delimiter within {} bytes",
        limits.max_prefix_bytes
    ))
    .into()
}

fn eof(msg: &'static str) -> DeployError {
    DeployError::Io(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, msg))
}

/// Number of bytes `encode_frame` emits for a payload of `n` bytes.
pub fn framed_len(n: usize) -> usize {
    n.to_string().len() + 1 + n
}
