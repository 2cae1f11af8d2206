//! Terminal front end: an interactive shell, or a line-per-command script
//! runner when `KAKEIBO_CLI_SCRIPT` is set.

pub mod commands;
pub mod help;
pub mod output;
pub mod registry;
pub mod shell;
pub mod shell_context;

pub use shell::run_cli;
pub use shell_context::{CliMode, CommandError, ShellContext};
