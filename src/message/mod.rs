//! Message module - typed payloads, payload codec, and the kind registry.
//!
//! Provides:
//! - the payload structs for the three request/response pairs
//! - [`MsgPackCodec`] for payload serialization
//! - [`decode_request`] / [`encode_response`] binding kinds to payloads

mod codec;
mod registry;
mod types;

pub use codec::MsgPackCodec;
pub use registry::{decode_request, encode_response, Request, Response};
pub use types::{
    CommandRequest, CommandResponse, MenuRequest, MenuResponse, PluginInfo, PluginInfoRequest,
};
