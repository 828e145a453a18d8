//! Shell completions generation

use crate::cli::{Cli, CompletionsArgs};
use crate::features::Features;
use anyhow::Result;
use clap_complete::generate;
use std::io;

pub fn run(args: CompletionsArgs, features: &Features) -> Result<()> {
    let mut cmd = Cli::command_for(features);
    generate(args.shell, &mut cmd, "cfn-hook", &mut io::stdout());
    Ok(())
}
