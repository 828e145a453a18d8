//! CLI argument parsing with clap

use std::path::PathBuf;

use clap::{Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use clap_complete::Shell;

use crate::features::Features;

/// Subcommand name of the experimental Lambda invoker command
pub const ENABLE_LAMBDA_INVOKER: &str = "enable-lambda-function-invoker";

/// cfn-hook - Inspect and configure CloudFormation Hooks
#[derive(Parser, Debug)]
#[command(name = "cfn-hook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// AWS profile to use
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// AWS region to operate in
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// CloudFormation endpoint to use
    #[arg(long, global = true)]
    pub endpoint_url: Option<String>,

    /// Hook type name (defaults to the typeName of the project in --project-dir)
    #[arg(long, global = true)]
    pub type_name: Option<String>,

    /// Hook project directory
    #[arg(long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Command definition with experimental subcommands shown or hidden
    pub fn command_for(features: &Features) -> clap::Command {
        Cli::command().mut_subcommand(ENABLE_LAMBDA_INVOKER, |cmd| {
            cmd.hide(!features.lambda_invoker)
        })
    }

    /// Parse the process arguments; exits on usage errors
    pub fn parse_with(features: &Features) -> Self {
        let matches = Self::command_for(features).get_matches();
        Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Describe the hook registered in your AWS account
    Describe(DescribeArgs),

    /// Set the default version of the hook
    SetDefaultVersion(SetDefaultVersionArgs),

    /// Set the type configuration of the hook from a JSON file
    Configure(ConfigureArgs),

    /// Activate the Lambda function invoker hook and point it at a function
    EnableLambdaFunctionInvoker(EnableLambdaInvokerArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Hook version to describe (defaults to the default version)
    #[arg(long)]
    pub version_id: Option<String>,
}

#[derive(Args, Debug)]
pub struct SetDefaultVersionArgs {
    /// Hook version to make the default
    #[arg(long)]
    pub version_id: String,
}

#[derive(Args, Debug)]
pub struct ConfigureArgs {
    /// Path to the type configuration JSON document
    #[arg(long)]
    pub configuration_path: PathBuf,
}

#[derive(Args, Debug, Clone, Default)]
pub struct EnableLambdaInvokerArgs {
    /// ARN of the Lambda function the hook invokes
    #[arg(long)]
    pub lambda_function_arn: String,

    /// ARN of the IAM role the hook runs as
    #[arg(long)]
    pub execution_role_arn: String,

    /// Failure mode: FAIL or WARN
    #[arg(long, default_value = "FAIL")]
    pub failure_mode: String,

    /// Type name alias for the activated hook, e.g. MyCompany::Lambda::Hook
    #[arg(long)]
    pub alias: Option<String>,

    /// Comma separated resource types to invoke the function for (default: all)
    #[arg(long)]
    pub include_targets: Option<String>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
