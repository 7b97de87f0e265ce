//! Framed stream I/O.
//!
//! [`FrameReader`] and [`FrameWriter`] move whole frames across a byte
//! stream. The protocol is strict request/response alternation, so reads
//! block for one complete frame and every write is flushed before it
//! returns. The host observes each response before issuing the next
//! request.

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::frame::Frame;
use super::wire::{Header, MessageKind, DEFAULT_MAX_PAYLOAD_SIZE, HEADER_SIZE};
use crate::error::{HostError, Result};

/// Reads discrete frames from a byte stream.
pub struct FrameReader<R> {
    inner: R,
    max_payload_size: u32,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    /// Create a reader with the default payload limit.
    pub fn new(inner: R) -> Self {
        Self::with_max_payload(inner, DEFAULT_MAX_PAYLOAD_SIZE)
    }

    /// Create a reader with a custom payload limit.
    pub fn with_max_payload(inner: R, max_payload_size: u32) -> Self {
        Self {
            inner,
            max_payload_size,
        }
    }

    /// Read the next frame.
    ///
    /// Returns:
    /// - `Ok(Some(frame))` for a complete frame with a registered kind
    /// - `Ok(None)` when the stream closed cleanly at a frame boundary
    /// - `Err(HostError::UnknownKind)` for a kind byte outside the
    ///   registry; the payload has already been consumed, so the stream
    ///   stays framed and the caller may keep reading
    /// - `Err(_)` for truncated frames, oversized payloads, or I/O faults
    pub async fn read_frame(&mut self) -> Result<Option<Frame>> {
        let mut header_buf = [0u8; HEADER_SIZE];

        // EOF before the first header byte is a clean close, not an error.
        match self.inner.read_exact(&mut header_buf[..1]).await {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => return Err(e.into()),
        }
        self.inner.read_exact(&mut header_buf[1..]).await?;

        let header = Header::decode(&header_buf).expect("header buffer is exactly HEADER_SIZE");
        header.validate(self.max_payload_size)?;

        let mut payload = vec![0u8; header.payload_length as usize];
        self.inner.read_exact(&mut payload).await?;

        let kind = MessageKind::from_u8(header.kind).ok_or(HostError::UnknownKind(header.kind))?;
        Ok(Some(Frame::new(kind, Bytes::from(payload))))
    }
}

/// Writes discrete frames to a byte stream.
pub struct FrameWriter<W> {
    inner: W,
}

impl<W: AsyncWrite + Unpin> FrameWriter<W> {
    /// Create a writer.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Write one frame and flush it.
    pub async fn write_frame(&mut self, kind: MessageKind, payload: &[u8]) -> Result<()> {
        if payload.len() > u32::MAX as usize {
            return Err(HostError::Protocol(format!(
                "payload size {} does not fit the length field",
                payload.len()
            )));
        }
        let header = Header::new(kind.as_u8(), payload.len() as u32);
        self.inner.write_all(&header.encode()).await?;
        self.inner.write_all(payload).await?;
        self.inner.flush().await?;
        Ok(())
    }

    /// Consume the writer, returning the underlying stream.
    pub fn into_inner(self) -> W {
        self.inner
    }
}
