//! Collaborator process execution.
//!
//! Command handlers shell out to downstream tools (container runtime,
//! version-control binary, and friends) and treat them as opaque
//! commands: argument vector in, combined output plus exit status out.
//! The [`Runner`] trait is that contract; tests substitute a fake to
//! exercise handlers without spawning anything.

use async_trait::async_trait;
use tokio::process::Command;

/// Captured outcome of one collaborator invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    /// Exit code, `None` when the process was terminated by a signal.
    pub status: Option<i32>,
    /// Combined stdout and stderr.
    pub output: String,
}

impl RunOutput {
    /// Whether the process exited zero.
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Synchronous-in-effect process runner.
///
/// Runs a program to completion; the output and exit status are the only
/// observable contract.
#[async_trait]
pub trait Runner: Send + Sync {
    async fn run(&self, program: &str, args: &[&str]) -> std::io::Result<RunOutput>;
}

/// Runner backed by real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl Runner for SystemRunner {
    async fn run(&self, program: &str, args: &[&str]) -> std::io::Result<RunOutput> {
        let out = Command::new(program).args(args).output().await?;
        let mut combined = String::from_utf8_lossy(&out.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&out.stderr));
        Ok(RunOutput {
            status: out.status.code(),
            output: combined,
        })
    }
}
