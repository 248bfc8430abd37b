//! CLI entry point for group-photos-dl.

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, info};

mod app;
mod cli;
mod config;
mod output;

use app::context::{RunContext, default_log_level};
use app::exit::ProcessExit;
use cli::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    let file_config = match config::load_default_file_config() {
        Ok(file_config) => file_config,
        Err(error) => {
            eprintln!("Error: {error:#}");
            return ProcessExit::Failure.into();
        }
    };

    app::terminal::init_tracing(default_log_level(&args, &file_config));
    debug!(?args, "CLI arguments parsed");
    info!(group = %args.group, "group-photos-dl starting");

    let ctx = RunContext::resolve(&args, &file_config);
    match app::runtime::run(&args, &ctx).await {
        Ok(exit) => {
            debug!(code = exit.code(), "run finished");
            exit.into()
        }
        Err(run_error) => {
            error!("{run_error:#}");
            ProcessExit::Failure.into()
        }
    }
}
