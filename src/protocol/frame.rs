//! Frame struct with typed accessors.
//!
//! Represents one complete protocol frame: a validated message kind plus
//! its payload bytes. Uses `bytes::Bytes` for cheap payload sharing.

use bytes::Bytes;

use super::wire::{Header, MessageKind, HEADER_SIZE};

/// A complete protocol frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Validated message kind.
    pub kind: MessageKind,
    /// Payload bytes.
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame from kind and payload.
    pub fn new(kind: MessageKind, payload: Bytes) -> Self {
        Self { kind, payload }
    }

    /// Create a frame from kind and raw bytes (copies data).
    pub fn from_parts(kind: MessageKind, payload: &[u8]) -> Self {
        Self {
            kind,
            payload: Bytes::copy_from_slice(payload),
        }
    }

    /// Get a reference to the payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Get the payload length.
    #[inline]
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// Check if this frame is a request.
    #[inline]
    pub fn is_request(&self) -> bool {
        self.kind.is_request()
    }
}

/// Build a complete frame as a single byte vector.
///
/// Encodes the header and appends the payload into a contiguous buffer.
/// Host-side test harnesses use this to script request frames.
pub fn build_frame(kind: MessageKind, payload: &[u8]) -> Vec<u8> {
    let header = Header::new(kind.as_u8(), payload.len() as u32);
    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
    buf.extend_from_slice(&header.encode());
    buf.extend_from_slice(payload);
    buf
}
