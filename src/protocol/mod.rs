//! Protocol module - wire format, framing, and framed stream I/O.
//!
//! This module implements the transport layer of the plugin host
//! protocol:
//! - 5-byte header encoding/decoding and the closed kind registry
//! - Frame struct with typed accessors
//! - Blocking-style framed reader/writer with flush-before-next-read
//!   semantics

mod frame;
mod stream;
mod wire;

pub use frame::{build_frame, Frame};
pub use stream::{FrameReader, FrameWriter};
pub use wire::{Header, MessageKind, DEFAULT_MAX_PAYLOAD_SIZE, HEADER_SIZE};
