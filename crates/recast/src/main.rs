//! Recast command-line entry point.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; the environment may already be set.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    recast::init_logging(cli.log_format, "recast=info,warn");

    let config_path = cli.config.as_deref();
    let outcome = match cli.command {
        Commands::Run(args) => cli::handle_run_command(config_path, args).await,
        Commands::Platforms => cli::handle_platforms_command(),
        Commands::Config => cli::handle_config_command(config_path),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
