//! Command implementations, one module per record group.
//!
//! Each operation declares its role allow-set as a const literal next to
//! the handler, so the whole authorization policy is readable in one place
//! per module.

pub mod auth;
pub mod client;
pub mod contract;
pub mod employee;
pub mod event;

use crate::cli::Command;
use crate::console::MessageSink;
use crate::runner::CommandEnv;

pub fn dispatch(
    command: Command,
    env: &CommandEnv,
    messages: &dyn MessageSink,
) -> anyhow::Result<()> {
    match command {
        Command::Login { username, password } => auth::login(env, messages, &username, &password),
        Command::Logoff => auth::logoff(env, messages),
        Command::Employee(cmd) => employee::dispatch(cmd, env, messages),
        Command::Client(cmd) => client::dispatch(cmd, env, messages),
        Command::Contract(cmd) => contract::dispatch(cmd, env, messages),
        Command::Event(cmd) => event::dispatch(cmd, env, messages),
    }
}
