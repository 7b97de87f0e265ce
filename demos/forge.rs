//! Forge plugin - manages a compose-based self-hosted git forge.
//!
//! This demo shows the full plugin surface: a nested menu with typed
//! parameters, hidden commands, and handlers that shell out to the
//! container runtime through [`plughost::exec::Runner`].
//!
//! A host spawns the binary and speaks the protocol over stdio:
//!
//! ```text
//! host ── PluginInfoRequest ──► forge
//! host ◄── PluginInfoResponse ── forge
//! host ── MenuRequest ─────────► forge
//! host ◄── MenuResponse ──────── forge
//! host ── CommandRequest(start) ► forge   (docker compose up -d)
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use plughost::exec::{Runner, SystemRunner};
use plughost::{CommandRequest, CommandResponse, MenuOption, ParameterInfo, Plugin};

const COMPOSE_FILE: &str = "docker-compose.yaml";

fn data_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".local/share/forge-plugin")
}

fn compose_path() -> PathBuf {
    data_dir().join(COMPOSE_FILE)
}

/// Run a `docker compose` subcommand against the configured compose file.
async fn compose(runner: &dyn Runner, args: &[&str]) -> CommandResponse {
    let path = compose_path();
    if !path.exists() {
        return CommandResponse::fail(
            "no compose file configured; use `Set Compose File` first",
        );
    }
    let path = path.display().to_string();
    let mut argv = vec!["compose", "-f", path.as_str()];
    argv.extend_from_slice(args);

    match runner.run("docker", &argv).await {
        Ok(out) if out.success() => CommandResponse::ok(out.output),
        Ok(out) => CommandResponse::fail(format!(
            "docker compose exited with {:?}:\n{}",
            out.status, out.output
        )),
        Err(e) => CommandResponse::fail(format!("failed to spawn docker: {e}")),
    }
}

fn set_custom_compose_file(req: &CommandRequest) -> CommandResponse {
    // `custom_path` is declared required in the menu, so it is present
    // and non-empty here.
    let source = &req.parameters["custom_path"];
    if !std::path::Path::new(source).exists() {
        return CommandResponse::fail(format!("compose file does not exist: {source}"));
    }
    if let Err(e) = std::fs::create_dir_all(data_dir()) {
        return CommandResponse::fail(format!("failed to create data directory: {e}"));
    }
    match std::fs::copy(source, compose_path()) {
        Ok(_) => CommandResponse::ok(format!(
            "compose file copied to {}",
            compose_path().display()
        )),
        Err(e) => CommandResponse::fail(format!("failed to copy compose file: {e}")),
    }
}

async fn git_config_summary(runner: &dyn Runner) -> CommandResponse {
    let name = runner
        .run("git", &["config", "--global", "--get", "user.name"])
        .await;
    let email = runner
        .run("git", &["config", "--global", "--get", "user.email"])
        .await;
    match (name, email) {
        (Ok(name), Ok(email)) => CommandResponse::ok(format!(
            "Global Git Config:\nName: {}\nEmail: {}",
            name.output.trim(),
            email.output.trim()
        )),
        (Err(e), _) | (_, Err(e)) => {
            CommandResponse::fail(format!("failed to read git config: {e}"))
        }
    }
}

fn menu() -> Vec<MenuOption> {
    vec![
        MenuOption::new("Set Compose File", "set_compose_file")
            .submenu(MenuOption::new(
                "Use Default Compose File",
                "set_compose_file_default",
            ))
            .submenu(
                MenuOption::new("Enter Custom Compose Path", "set_compose_file_custom")
                    .parameter(ParameterInfo::required(
                        "custom_path",
                        "Path to a compose file",
                    )),
            ),
        MenuOption::new("Setup Forge", "setup")
            .parameter(ParameterInfo::required("username", "Forge admin user"))
            .parameter(ParameterInfo::required("email", "Forge admin email"))
            .parameter(ParameterInfo::optional(
                "ssh_port",
                "SSH port for the forge (default 22)",
            )),
        MenuOption::new("Start Forge", "start"),
        MenuOption::new("Stop Forge", "stop"),
        MenuOption::new("Restart Forge", "restart"),
        MenuOption::new("Print Git Config Summary", "git_config_summary"),
    ]
}

#[tokio::main]
async fn main() -> plughost::Result<()> {
    // stdout carries protocol frames; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let runner: Arc<dyn Runner> = Arc::new(SystemRunner);

    let default_compose = |_req: CommandRequest| async move {
        if let Err(e) = std::fs::create_dir_all(data_dir()) {
            return CommandResponse::fail(format!("failed to create data directory: {e}"));
        }
        match std::fs::write(compose_path(), DEFAULT_COMPOSE) {
            Ok(()) => CommandResponse::ok(format!(
                "default compose file written to {}",
                compose_path().display()
            )),
            Err(e) => CommandResponse::fail(format!("failed to write compose file: {e}")),
        }
    };

    let start = {
        let runner = runner.clone();
        move |_req: CommandRequest| {
            let runner = runner.clone();
            async move { compose(runner.as_ref(), &["up", "-d"]).await }
        }
    };
    let stop = {
        let runner = runner.clone();
        move |_req: CommandRequest| {
            let runner = runner.clone();
            async move { compose(runner.as_ref(), &["down"]).await }
        }
    };
    let restart = {
        let runner = runner.clone();
        move |_req: CommandRequest| {
            let runner = runner.clone();
            async move { compose(runner.as_ref(), &["restart"]).await }
        }
    };
    let setup = {
        let runner = runner.clone();
        move |req: CommandRequest| {
            let runner = runner.clone();
            async move {
                let up = compose(runner.as_ref(), &["up", "-d"]).await;
                if !up.success {
                    return up;
                }
                let username = &req.parameters["username"];
                CommandResponse::ok(format!("forge is up; admin account: {username}"))
            }
        }
    };
    let config_summary = {
        let runner = runner.clone();
        move |_req: CommandRequest| {
            let runner = runner.clone();
            async move { git_config_summary(runner.as_ref()).await }
        }
    };

    let mut builder = Plugin::builder("forge", env!("CARGO_PKG_VERSION"));
    for option in menu() {
        builder = builder.menu_option(option);
    }
    let plugin = builder
        .command("set_compose_file_default", default_compose)
        .command("set_compose_file_custom", |req: CommandRequest| async move {
            set_custom_compose_file(&req)
        })
        .command("setup", setup)
        .command("start", start)
        .command("stop", stop)
        .command("restart", restart)
        .command("git_config_summary", config_summary)
        .command("go_back", |_req: CommandRequest| async {
            CommandResponse::ok("returned to previous menu")
        })
        .build()?;

    plughost::serve(plugin).await
}

const DEFAULT_COMPOSE: &str = r#"services:
  forge:
    image: gitea/gitea:1.22
    restart: always
    ports:
      - "3000:3000"
      - "2222:22"
    volumes:
      - forge-data:/data
volumes:
  forge-data:
"#;
