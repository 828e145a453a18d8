//! cfn-hook CLI - Inspect and configure CloudFormation Hooks
//!
//! This is the main entry point for the cfn-hook command-line interface.

mod cli;
mod commands;
mod features;
mod output;

use std::process::ExitCode;

use anyhow::Result;
use cfn_hook_core::Error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};
use commands::CommandContext;
use features::Features;

#[tokio::main]
async fn main() -> ExitCode {
    let features = Features::from_env();

    // Parse CLI args
    let cli = Cli::parse_with(&features);

    init_tracing(cli.verbose, cli.quiet);

    let result = tokio::select! {
        result = run(cli, features) => result,
        _ = tokio::signal::ctrl_c() => {
            Err(Error::interrupted("received Ctrl-C, no further calls were made").into())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(&format!("{:#}", err));
            ExitCode::from(exit_code(&err))
        }
    }
}

async fn run(cli: Cli, features: Features) -> Result<()> {
    let ctx = CommandContext::from_cli(&cli, features);

    match cli.command {
        Commands::Describe(args) => commands::describe::run(args, &ctx).await,
        Commands::SetDefaultVersion(args) => commands::set_default_version::run(args, &ctx).await,
        Commands::Configure(args) => commands::configure::run(args, &ctx).await,
        Commands::EnableLambdaFunctionInvoker(args) => {
            commands::enable_lambda_invoker::run(args, &ctx).await
        }
        Commands::Completions(args) => commands::completions::run(args, &features),
    }
}

/// Process exit code for a failed command
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<Error>()
        .map(Error::exit_code)
        .and_then(|code| u8::try_from(code).ok())
        .unwrap_or(1)
}

/// Initialize tracing with appropriate verbosity
///
/// Logs go to stderr so stdout carries only command output. `RUST_LOG`
/// wins over the flags when set.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
