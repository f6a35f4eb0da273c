//! Command-line interface for the recast binary.

mod commands;
mod platforms;
mod run;
mod show_config;

pub use commands::{Cli, Commands, RunArgs};
pub use platforms::handle_platforms_command;
pub use run::handle_run_command;
pub use show_config::handle_config_command;
