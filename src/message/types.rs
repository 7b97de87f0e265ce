//! Typed payloads for the three request/response pairs.
//!
//! These structs are the versioned wire schema: every field rides inside
//! a MsgPack map keyed by field name. Optional fields default on decode
//! so hosts may omit them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::menu::MenuOption;

/// Request for the plugin's static identity. Carries no fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfoRequest {}

/// Static plugin identity, created once at startup and immutable for the
/// process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    pub name: String,
    pub version: String,
}

impl PluginInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Request for the menu tree. Carries no fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuRequest {}

/// The plugin's declarative menu tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuResponse {
    #[serde(default)]
    pub options: Vec<MenuOption>,
}

/// One command invocation. Constructed by the host, consumed once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRequest {
    pub command: String,
    #[serde(default)]
    pub parameters: HashMap<String, String>,
}

impl CommandRequest {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            parameters: HashMap::new(),
        }
    }

    /// Attach a parameter.
    pub fn parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }
}

/// Outcome of one command invocation.
///
/// Exactly one of `result` / `error_message` carries meaning, selected by
/// `success`; both fields are always present on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub error_message: String,
}

impl CommandResponse {
    /// A successful outcome with a result string.
    pub fn ok(result: impl Into<String>) -> Self {
        Self {
            success: true,
            result: result.into(),
            error_message: String::new(),
        }
    }

    /// A failed outcome with an error string.
    pub fn fail(error_message: impl Into<String>) -> Self {
        Self {
            success: false,
            result: String::new(),
            error_message: error_message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MsgPackCodec;

    #[test]
    fn test_command_response_constructors() {
        let ok = CommandResponse::ok("containers started");
        assert!(ok.success);
        assert_eq!(ok.result, "containers started");
        assert!(ok.error_message.is_empty());

        let fail = CommandResponse::fail("unknown command");
        assert!(!fail.success);
        assert!(fail.result.is_empty());
        assert_eq!(fail.error_message, "unknown command");
    }

    #[test]
    fn test_command_request_roundtrip() {
        let request = CommandRequest::new("setup")
            .parameter("username", "admin")
            .parameter("email", "admin@example.com");
        let bytes = MsgPackCodec::encode(&request).unwrap();
        let decoded: CommandRequest = MsgPackCodec::decode(&bytes).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_empty_requests_roundtrip() {
        let bytes = MsgPackCodec::encode(&PluginInfoRequest::default()).unwrap();
        let _: PluginInfoRequest = MsgPackCodec::decode(&bytes).unwrap();

        let bytes = MsgPackCodec::encode(&MenuRequest::default()).unwrap();
        let _: MenuRequest = MsgPackCodec::decode(&bytes).unwrap();
    }

    #[test]
    fn test_request_without_parameters_field_decodes() {
        // A host may omit `parameters` entirely.
        #[derive(serde::Serialize)]
        struct Bare<'a> {
            command: &'a str,
        }
        let bytes = MsgPackCodec::encode(&Bare { command: "start" }).unwrap();
        let decoded: CommandRequest = MsgPackCodec::decode(&bytes).unwrap();
        assert_eq!(decoded.command, "start");
        assert!(decoded.parameters.is_empty());
    }
}
