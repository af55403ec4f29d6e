//! `eventcrm-cli` — the role-gated command surface.
//!
//! Every record command runs through the same shape: open one session,
//! resolve the acting identity through the guard chain, check the
//! operation's role allow-set, execute the body against the session's unit
//! of work, then commit — or release without writing on any denial or error.

pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod runner;
pub mod telemetry;

pub use cli::{AuthArgs, Cli, Command};
pub use config::AppConfig;
pub use console::{Console, MessageSink, Severity};
pub use runner::{BodyError, CommandEnv};

/// Execute one parsed invocation against the configured environment.
pub fn run(cli: Cli, config: &AppConfig, messages: &dyn MessageSink) -> anyhow::Result<()> {
    let env = CommandEnv::new(config);
    commands::dispatch(cli.command, &env, messages)
}
