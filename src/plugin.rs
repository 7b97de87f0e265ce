//! Plugin builder and capability surface.
//!
//! A [`Plugin`] is the stable capability set every plugin exposes: its
//! static identity, its menu tree, and command execution. The builder
//! validates the menu, checks every menu leaf has a handler, and wires
//! required-parameter lists from the menu into the dispatcher, all
//! before the session loop ever reads a frame. After `build()` nothing
//! is mutable.

use std::collections::HashSet;

use crate::dispatch::{CommandDispatcher, CommandHandler};
use crate::error::{HostError, Result};
use crate::menu::{self, MenuOption};
use crate::message::{MenuResponse, PluginInfo, Request, Response};

/// A fully-assembled plugin: identity, menu, and command table.
pub struct Plugin {
    info: PluginInfo,
    menu: Vec<MenuOption>,
    dispatcher: CommandDispatcher,
}

impl Plugin {
    /// Start building a plugin with its static identity.
    pub fn builder(name: impl Into<String>, version: impl Into<String>) -> PluginBuilder {
        PluginBuilder {
            info: PluginInfo::new(name, version),
            menu: Vec::new(),
            handlers: Vec::new(),
        }
    }

    /// The plugin's static identity.
    pub fn info(&self) -> &PluginInfo {
        &self.info
    }

    /// Describe the menu tree.
    ///
    /// Purely declarative and re-derived identically on every call, so a
    /// host may poll without caching assumptions.
    pub fn describe(&self) -> MenuResponse {
        MenuResponse {
            options: self.menu.clone(),
        }
    }

    /// Handle one decoded request.
    ///
    /// Infallible at the protocol level: command faults come back inside
    /// the [`CommandResponse`](crate::message::CommandResponse).
    pub async fn handle(&self, request: Request) -> Response {
        match request {
            Request::PluginInfo(_) => Response::PluginInfo(self.info.clone()),
            Request::Menu(_) => Response::Menu(self.describe()),
            Request::Command(req) => Response::Command(self.dispatcher.execute(req).await),
        }
    }
}

/// Fluent builder for [`Plugin`].
pub struct PluginBuilder {
    info: PluginInfo,
    menu: Vec<MenuOption>,
    handlers: Vec<(String, Box<dyn CommandHandler>)>,
}

impl PluginBuilder {
    /// Append a top-level menu option.
    pub fn menu_option(mut self, option: MenuOption) -> Self {
        self.menu.push(option);
        self
    }

    /// Bind a handler to a command identifier.
    ///
    /// Commands need not appear in the menu; hidden commands are legal.
    pub fn command(mut self, command: impl Into<String>, handler: impl CommandHandler) -> Self {
        self.handlers.push((command.into(), Box::new(handler)));
        self
    }

    /// Validate everything and assemble the plugin.
    pub fn build(self) -> Result<Plugin> {
        menu::validate(&self.menu)?;

        let mut dispatcher = CommandDispatcher::new();
        let mut seen = HashSet::new();
        for (command, handler) in self.handlers {
            if !seen.insert(command.clone()) {
                return Err(HostError::Registration(format!(
                    "duplicate handler for command `{command}`"
                )));
            }
            dispatcher.register_boxed(command, handler);
        }

        for leaf in menu::leaves(&self.menu) {
            if !dispatcher.contains(&leaf.command) {
                return Err(HostError::Registration(format!(
                    "menu command `{}` has no handler",
                    leaf.command
                )));
            }
            dispatcher.set_required(&leaf.command, leaf.required_parameters());
        }

        Ok(Plugin {
            info: self.info,
            menu: self.menu,
            dispatcher,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::ParameterInfo;
    use crate::message::{CommandRequest, CommandResponse, MenuRequest, PluginInfoRequest};

    fn sample_plugin() -> Plugin {
        Plugin::builder("forge", "1.0.0")
            .menu_option(
                MenuOption::new("Setup", "setup")
                    .parameter(ParameterInfo::required("username", "User name")),
            )
            .menu_option(MenuOption::new("Start", "start"))
            .command("setup", |_req: CommandRequest| async {
                CommandResponse::ok("configured")
            })
            .command("start", |_req: CommandRequest| async {
                CommandResponse::ok("started")
            })
            .command("go_back", |_req: CommandRequest| async {
                CommandResponse::ok("returned to previous menu")
            })
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_info_request_returns_static_identity() {
        let plugin = sample_plugin();
        match plugin.handle(Request::PluginInfo(PluginInfoRequest::default())).await {
            Response::PluginInfo(info) => {
                assert_eq!(info.name, "forge");
                assert_eq!(info.version, "1.0.0");
            }
            other => panic!("expected plugin info, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_describe_is_idempotent() {
        let plugin = sample_plugin();
        let first = plugin.describe();
        let second = plugin.describe();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_menu_request_routes_to_describe() {
        let plugin = sample_plugin();
        match plugin.handle(Request::Menu(MenuRequest::default())).await {
            Response::Menu(menu) => assert_eq!(menu.options.len(), 2),
            other => panic!("expected menu, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_menu_wires_required_parameters() {
        let plugin = sample_plugin();
        let request = Request::Command(CommandRequest::new("setup"));
        match plugin.handle(request).await {
            Response::Command(resp) => {
                assert!(!resp.success);
                assert!(resp.error_message.contains("username"));
            }
            other => panic!("expected command response, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_hidden_command_is_executable() {
        let plugin = sample_plugin();
        let request = Request::Command(CommandRequest::new("go_back"));
        match plugin.handle(request).await {
            Response::Command(resp) => assert!(resp.success),
            other => panic!("expected command response, got {other:?}"),
        }
    }

    #[test]
    fn test_menu_leaf_without_handler_rejected() {
        let result = Plugin::builder("forge", "1.0.0")
            .menu_option(MenuOption::new("Start", "start"))
            .build();
        assert!(matches!(result, Err(HostError::Registration(_))));
    }

    #[test]
    fn test_duplicate_handler_rejected() {
        let result = Plugin::builder("forge", "1.0.0")
            .command("start", |_req: CommandRequest| async {
                CommandResponse::ok("a")
            })
            .command("start", |_req: CommandRequest| async {
                CommandResponse::ok("b")
            })
            .build();
        assert!(matches!(result, Err(HostError::Registration(_))));
    }

    #[test]
    fn test_invalid_menu_rejected() {
        let result = Plugin::builder("forge", "1.0.0")
            .menu_option(MenuOption::new("A", "start"))
            .menu_option(MenuOption::new("B", "start"))
            .command("start", |_req: CommandRequest| async {
                CommandResponse::ok("")
            })
            .build();
        assert!(matches!(result, Err(HostError::InvalidMenu(_))));
    }
}
