//! Interactive and scripted shell over [`crate::Dashboard`].

pub mod commands;
pub mod context;
pub mod output;
mod shell;

pub use context::{CliMode, CommandError, ShellContext};
pub use shell::{run_cli, SCRIPT_ENV};
