//! # plughost
//!
//! Plugin-side SDK for the menu-driven plugin host protocol.
//!
//! A plugin is a standalone binary the host spawns and talks to over the
//! plugin's standard input and output. The exchange is a framed, typed
//! request/response protocol with three operations:
//!
//! - **GetPluginInfo** - static name and version
//! - **GetMenu** - a declarative tree of selectable actions with typed
//!   parameter metadata
//! - **ExecuteCommand** - run one leaf command with string parameters
//!
//! Frames alternate strictly: the host writes one request, the plugin
//! responds, and only then is the next request read. Standard error is
//! reserved for diagnostics.
//!
//! ## Example
//!
//! ```no_run
//! use plughost::{CommandRequest, CommandResponse, MenuOption, Plugin};
//!
//! #[tokio::main]
//! async fn main() -> plughost::Result<()> {
//!     let plugin = Plugin::builder("demo", "0.1.0")
//!         .menu_option(MenuOption::new("Start service", "start"))
//!         .command("start", |_req: CommandRequest| async {
//!             CommandResponse::ok("started")
//!         })
//!         .build()?;
//!
//!     plughost::serve(plugin).await
//! }
//! ```

pub mod dispatch;
pub mod error;
pub mod exec;
pub mod menu;
pub mod message;
pub mod protocol;
pub mod session;

mod plugin;

pub use error::{HostError, Result};
pub use menu::{MenuOption, ParameterInfo};
pub use message::{CommandRequest, CommandResponse, PluginInfo};
pub use plugin::{Plugin, PluginBuilder};
pub use session::{serve, Session, SessionConfig};
