//! Error types for plughost.

use thiserror::Error;

use crate::protocol::MessageKind;

/// Main error type for all protocol operations.
#[derive(Debug, Error)]
pub enum HostError {
    /// I/O error on the transport.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// MsgPack serialization error.
    #[error("MsgPack encode error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// MsgPack deserialization error.
    #[error("MsgPack decode error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    /// Protocol violation (oversized payload, truncated frame, etc.).
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Frame carried a kind byte outside the closed registry.
    #[error("Unknown message kind: {0}")]
    UnknownKind(u8),

    /// Well-formed frame whose kind is not a request (e.g. a stray response).
    #[error("Unexpected message kind: {0:?}")]
    UnexpectedKind(MessageKind),

    /// Menu tree failed validation at build time.
    #[error("Invalid menu: {0}")]
    InvalidMenu(String),

    /// Command registration failed at build time.
    #[error("Registration error: {0}")]
    Registration(String),
}

impl HostError {
    /// Whether this error is scoped to a single incoming message.
    ///
    /// The session loop logs these and keeps running; anything else tears
    /// the session down.
    pub fn is_frame_error(&self) -> bool {
        matches!(
            self,
            HostError::UnknownKind(_) | HostError::UnexpectedKind(_) | HostError::Decode(_)
        )
    }
}

/// Result type alias using HostError.
pub type Result<T> = std::result::Result<T, HostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_errors_are_recoverable() {
        assert!(HostError::UnknownKind(9).is_frame_error());
        assert!(HostError::UnexpectedKind(MessageKind::CommandResponse).is_frame_error());
        assert!(!HostError::Protocol("oversized".to_string()).is_frame_error());
        assert!(
            !HostError::Io(std::io::Error::from(std::io::ErrorKind::UnexpectedEof))
                .is_frame_error()
        );
    }

    #[test]
    fn test_display_includes_kind_byte() {
        let err = HostError::UnknownKind(42);
        assert!(err.to_string().contains("42"));
    }
}
