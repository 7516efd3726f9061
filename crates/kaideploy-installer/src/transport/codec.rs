//! Framed connection over an async byte stream.
//!
//! - Reads: length prefix up to `:`, then exactly that many payload bytes
//! - Writes: one encoded buffer per frame, flushed before returning
//! - Frames are strictly sequential; `&mut self` keeps callers from
//!   interleaving two reads or two writes on the same stream

use bytes::Bytes;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufStream};

use kaideploy_core::error::{DeployError, Result};
use kaideploy_core::protocol::frame::{decode_payload, encode_frame, missing_delimiter, parse_length};
use kaideploy_core::protocol::{FrameLimits, Reply, DELIMITER};

#[derive(Debug)]
pub struct FramedConnection<S> {
    io: BufStream<S>,
    limits: FrameLimits,
}

impl<S> FramedConnection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, limits: FrameLimits) -> Self {
        Self {
            io: BufStream::new(stream),
            limits,
        }
    }

    pub fn limits(&self) -> &FrameLimits {
        &self.limits
    }

    /// Read one frame and return its raw payload.
    pub async fn read_frame_bytes(&mut self) -> Result<Bytes> {
        let max_prefix = self.limits.max_prefix_bytes;
        let mut prefix = Vec::with_capacity(8);
        let n = (&mut self.io)
            .take(max_prefix as u64)
            .read_until(DELIMITER, &mut prefix)
            .await?;

        if prefix.last() != Some(&DELIMITER) {
            if n == max_prefix {
                return Err(missing_delimiter(&self.limits));
            }
            return Err(DeployError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "stream closed before length delimiter",
            )));
        }
        prefix.pop();

        let len = parse_length(&prefix, &self.limits)?;
        let mut payload = vec![0u8; len];
        self.io.read_exact(&mut payload).await?;

        tracing::trace!(len, "frame read");
        Ok(Bytes::from(payload))
    }

    /// Read one frame and parse it as JSON.
    pub async fn read_frame(&mut self) -> Result<Reply> {
        let payload = self.read_frame_bytes().await?;
        decode_payload(&payload)
    }

    /// Write one frame. Returns the number of bytes put on the wire.
    pub async fn write_frame<T>(&mut self, msg: &T) -> Result<usize>
    where
        T: serde::Serialize + ?Sized,
    {
        let frame = encode_frame(msg)?;
        self.io.write_all(&frame).await?;
        self.io.flush().await?;

        tracing::trace!(len = frame.len(), "frame written");
        Ok(frame.len())
    }

    /// Flush and shut down the write half.
    pub async fn shutdown(&mut self) -> Result<()> {
        self.io.shutdown().await?;
        Ok(())
    }

    pub fn into_inner(self) -> S {
        self.io.into_inner()
    }
}
