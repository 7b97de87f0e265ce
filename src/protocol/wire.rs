//! Wire format encoding and decoding.
//!
//! Implements the 5-byte frame header:
//! ```text
//! ┌──────────┬────────────────┐
//! │ Kind     │ Payload length │
//! │ 1 byte   │ 4 bytes        │
//! │ u8       │ u32 BE         │
//! └──────────┴────────────────┘
//! ```
//!
//! The kind byte identifies one of a closed set of message types; the
//! length field lets a reader determine payload boundaries without
//! out-of-band information.

use crate::error::{HostError, Result};

/// Header size in bytes (fixed, exactly 5).
pub const HEADER_SIZE: usize = 5;

/// Default maximum payload size (16 MiB).
pub const DEFAULT_MAX_PAYLOAD_SIZE: u32 = 16 * 1024 * 1024;

/// Message kinds on the wire.
///
/// Every request kind has exactly one corresponding response kind.
/// Request numbering (1 = info, 2 = execute, 3 = menu) is part of the
/// versioned wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageKind {
    PluginInfoRequest = 1,
    CommandRequest = 2,
    MenuRequest = 3,
    PluginInfoResponse = 4,
    CommandResponse = 5,
    MenuResponse = 6,
}

impl MessageKind {
    /// Decode a kind byte. Returns `None` for anything outside the registry.
    pub fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(MessageKind::PluginInfoRequest),
            2 => Some(MessageKind::CommandRequest),
            3 => Some(MessageKind::MenuRequest),
            4 => Some(MessageKind::PluginInfoResponse),
            5 => Some(MessageKind::CommandResponse),
            6 => Some(MessageKind::MenuResponse),
            _ => None,
        }
    }

    /// The kind byte as written on the wire.
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Check if this kind is a request.
    #[inline]
    pub fn is_request(self) -> bool {
        matches!(
            self,
            MessageKind::PluginInfoRequest | MessageKind::CommandRequest | MessageKind::MenuRequest
        )
    }

    /// The response kind paired with this request kind.
    pub fn response_kind(self) -> Option<MessageKind> {
        match self {
            MessageKind::PluginInfoRequest => Some(MessageKind::PluginInfoResponse),
            MessageKind::CommandRequest => Some(MessageKind::CommandResponse),
            MessageKind::MenuRequest => Some(MessageKind::MenuResponse),
            _ => None,
        }
    }
}

/// Decoded frame header.
///
/// The kind is kept as a raw byte here; conversion to [`MessageKind`]
/// happens after the payload has been consumed, so an unknown kind does
/// not desynchronize the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Raw kind byte.
    pub kind: u8,
    /// Payload length in bytes.
    pub payload_length: u32,
}

impl Header {
    /// Create a new header.
    pub fn new(kind: u8, payload_length: u32) -> Self {
        Self {
            kind,
            payload_length,
        }
    }

    /// Encode header to bytes (length in Big Endian).
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0] = self.kind;
        buf[1..5].copy_from_slice(&self.payload_length.to_be_bytes());
        buf
    }

    /// Decode header from bytes.
    ///
    /// Returns `None` if the buffer is too short.
    pub fn decode(buf: &[u8]) -> Option<Self> {
        if buf.len() < HEADER_SIZE {
            return None;
        }
        Some(Self {
            kind: buf[0],
            payload_length: u32::from_be_bytes([buf[1], buf[2], buf[3], buf[4]]),
        })
    }

    /// Validate the header against the configured payload limit.
    pub fn validate(&self, max_payload_size: u32) -> Result<()> {
        if self.payload_length > max_payload_size {
            return Err(HostError::Protocol(format!(
                "payload size {} exceeds maximum {}",
                self.payload_length, max_payload_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_encode_decode_roundtrip() {
        let original = Header::new(MessageKind::CommandRequest.as_u8(), 100);
        let encoded = original.encode();
        let decoded = Header::decode(&encoded).unwrap();
        assert_eq!(original, decoded);
    }

    #[test]
    fn test_header_big_endian_byte_order() {
        let header = Header::new(0x02, 0x08090A0B);
        let bytes = header.encode();

        assert_eq!(bytes[0], 0x02);
        assert_eq!(bytes[1], 0x08);
        assert_eq!(bytes[2], 0x09);
        assert_eq!(bytes[3], 0x0A);
        assert_eq!(bytes[4], 0x0B);
    }

    #[test]
    fn test_header_size_is_exactly_5() {
        assert_eq!(HEADER_SIZE, 5);
        let header = Header::new(1, 0);
        assert_eq!(header.encode().len(), 5);
    }

    #[test]
    fn test_decode_too_short_buffer() {
        let buf = [0u8; 4]; // One byte short
        assert!(Header::decode(&buf).is_none());
    }

    #[test]
    fn test_validate_payload_too_large() {
        let header = Header::new(1, 1_000_000);
        let result = header.validate(100);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("exceeds maximum"));
    }

    #[test]
    fn test_kind_roundtrip() {
        for raw in 1u8..=6 {
            let kind = MessageKind::from_u8(raw).unwrap();
            assert_eq!(kind.as_u8(), raw);
        }
        assert!(MessageKind::from_u8(0).is_none());
        assert!(MessageKind::from_u8(7).is_none());
        assert!(MessageKind::from_u8(255).is_none());
    }

    #[test]
    fn test_request_response_pairing() {
        assert_eq!(
            MessageKind::PluginInfoRequest.response_kind(),
            Some(MessageKind::PluginInfoResponse)
        );
        assert_eq!(
            MessageKind::CommandRequest.response_kind(),
            Some(MessageKind::CommandResponse)
        );
        assert_eq!(
            MessageKind::MenuRequest.response_kind(),
            Some(MessageKind::MenuResponse)
        );
        assert_eq!(MessageKind::CommandResponse.response_kind(), None);
    }

    #[test]
    fn test_is_request() {
        assert!(MessageKind::PluginInfoRequest.is_request());
        assert!(MessageKind::CommandRequest.is_request());
        assert!(MessageKind::MenuRequest.is_request());
        assert!(!MessageKind::PluginInfoResponse.is_request());
        assert!(!MessageKind::CommandResponse.is_request());
        assert!(!MessageKind::MenuResponse.is_request());
    }
}
