//! Command dispatch - routes execute-command requests to handlers.
//!
//! The dispatcher is a flat, string-keyed registration table built once
//! at startup and read-only afterwards. Hierarchy is a menu concern; the
//! dispatcher only knows unique leaf identifiers.
//!
//! Two conditions are dispatcher-level: an unknown command identifier and
//! a missing required parameter. Both produce a structured failure
//! [`CommandResponse`] without invoking any handler. Everything that goes
//! wrong *inside* a handler is the handler's job to translate into a
//! failure response; as a last resort the dispatch boundary catches
//! panics so one bad command cannot end the session.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use crate::message::{CommandRequest, CommandResponse};

/// Boxed future returned by command handlers.
pub type HandlerFuture = Pin<Box<dyn Future<Output = CommandResponse> + Send + 'static>>;

/// A command handler bound to a leaf identifier.
///
/// Implemented for any `Fn(CommandRequest) -> Future<Output = CommandResponse>`
/// closure, so plugins register plain async closures.
pub trait CommandHandler: Send + Sync + 'static {
    /// Run the command. Required parameters are guaranteed present and
    /// non-empty when this is called.
    fn call(&self, request: CommandRequest) -> HandlerFuture;
}

impl<F, Fut> CommandHandler for F
where
    F: Fn(CommandRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CommandResponse> + Send + 'static,
{
    fn call(&self, request: CommandRequest) -> HandlerFuture {
        Box::pin(self(request))
    }
}

struct CommandEntry {
    /// Names of parameters that must be present and non-empty, in
    /// declaration order.
    required: Vec<String>,
    handler: Box<dyn CommandHandler>,
}

/// Registration table mapping command identifiers to handlers.
#[derive(Default)]
pub struct CommandDispatcher {
    commands: HashMap<String, CommandEntry>,
}

impl CommandDispatcher {
    /// Create an empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a command identifier.
    ///
    /// Replaces any previous handler for the same identifier; duplicate
    /// detection happens in the plugin builder.
    pub fn register(&mut self, command: impl Into<String>, handler: impl CommandHandler) {
        self.register_boxed(command.into(), Box::new(handler));
    }

    /// Register an already-boxed handler.
    pub fn register_boxed(&mut self, command: String, handler: Box<dyn CommandHandler>) {
        self.commands.insert(
            command,
            CommandEntry {
                required: Vec::new(),
                handler,
            },
        );
    }

    /// Attach the required-parameter list for a registered command.
    ///
    /// No-op if the command is not registered.
    pub fn set_required(&mut self, command: &str, required: Vec<String>) {
        if let Some(entry) = self.commands.get_mut(command) {
            entry.required = required;
        }
    }

    /// Whether a handler is registered for this identifier.
    pub fn contains(&self, command: &str) -> bool {
        self.commands.contains_key(command)
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Execute a command request to completion.
    ///
    /// Never returns a protocol-level failure: unknown commands, missing
    /// parameters, and panicking handlers all come back as
    /// `CommandResponse { success: false, .. }`.
    pub async fn execute(&self, request: CommandRequest) -> CommandResponse {
        let entry = match self.commands.get(&request.command) {
            Some(entry) => entry,
            None => return CommandResponse::fail("unknown command"),
        };

        let missing: Vec<&str> = entry
            .required
            .iter()
            .filter(|name| {
                request
                    .parameters
                    .get(name.as_str())
                    .map_or(true, |value| value.is_empty())
            })
            .map(|name| name.as_str())
            .collect();
        if !missing.is_empty() {
            return CommandResponse::fail(format!(
                "missing required parameter(s): {}",
                missing.join(", ")
            ));
        }

        let command = request.command.clone();
        // The handler future runs on its own task so a panic unwinds the
        // task, not the session loop.
        match tokio::spawn(entry.handler.call(request)).await {
            Ok(response) => response,
            Err(err) if err.is_panic() => {
                tracing::error!("Handler panicked for command {}", command);
                CommandResponse::fail(format!("command `{command}` panicked"))
            }
            Err(_) => CommandResponse::fail(format!("command `{command}` was cancelled")),
        }
    }
}
