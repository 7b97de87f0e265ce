//! Message registry - maps frame kinds to typed payloads.
//!
//! Exactly three request kinds exist at the protocol level. Decoding a
//! frame yields a [`Request`]; encoding a [`Response`] yields the paired
//! response kind plus payload bytes for the frame writer.

use crate::error::{HostError, Result};
use crate::protocol::{Frame, MessageKind};

use super::codec::MsgPackCodec;
use super::types::{
    CommandRequest, CommandResponse, MenuRequest, MenuResponse, PluginInfo, PluginInfoRequest,
};

/// A decoded request frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    PluginInfo(PluginInfoRequest),
    Command(CommandRequest),
    Menu(MenuRequest),
}

impl Request {
    /// The wire kind this request arrived as.
    pub fn kind(&self) -> MessageKind {
        match self {
            Request::PluginInfo(_) => MessageKind::PluginInfoRequest,
            Request::Command(_) => MessageKind::CommandRequest,
            Request::Menu(_) => MessageKind::MenuRequest,
        }
    }
}

/// A response ready to be encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    PluginInfo(PluginInfo),
    Command(CommandResponse),
    Menu(MenuResponse),
}

impl Response {
    /// The wire kind this response is written as.
    pub fn kind(&self) -> MessageKind {
        match self {
            Response::PluginInfo(_) => MessageKind::PluginInfoResponse,
            Response::Command(_) => MessageKind::CommandResponse,
            Response::Menu(_) => MessageKind::MenuResponse,
        }
    }
}

/// Decode a request frame into its typed payload.
///
/// A structurally undecodable payload surfaces the decode error; a
/// well-formed frame whose kind is not a request surfaces
/// [`HostError::UnexpectedKind`]. Both are per-message conditions the
/// session loop logs and skips.
pub fn decode_request(frame: &Frame) -> Result<Request> {
    match frame.kind {
        MessageKind::PluginInfoRequest => {
            Ok(Request::PluginInfo(MsgPackCodec::decode(frame.payload())?))
        }
        MessageKind::CommandRequest => Ok(Request::Command(MsgPackCodec::decode(frame.payload())?)),
        MessageKind::MenuRequest => Ok(Request::Menu(MsgPackCodec::decode(frame.payload())?)),
        other => Err(HostError::UnexpectedKind(other)),
    }
}

/// Encode a response into its wire kind and payload bytes.
pub fn encode_response(response: &Response) -> Result<(MessageKind, Vec<u8>)> {
    let payload = match response {
        Response::PluginInfo(info) => MsgPackCodec::encode(info)?,
        Response::Command(resp) => MsgPackCodec::encode(resp)?,
        Response::Menu(resp) => MsgPackCodec::encode(resp)?,
    };
    Ok((response.kind(), payload))
}
