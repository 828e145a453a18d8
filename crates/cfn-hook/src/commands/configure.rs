//! Configure command

use std::path::Path;

use anyhow::{Context, Result};
use cfn_hook_core::Error;
use cfn_hook_registry::{ConfigurationTarget, HookRegistry};
use serde::de::IgnoredAny;
use tracing::debug;

use super::CommandContext;
use crate::cli::ConfigureArgs;

pub async fn run(args: ConfigureArgs, ctx: &CommandContext) -> Result<()> {
    // A bad document fails before any client is built
    let configuration = read_configuration(&args.configuration_path)?;
    let type_name = ctx.hook_type_name()?;
    let registry = ctx.registry().await?;

    let arn = configure(&registry, &type_name, &configuration).await?;
    println!("ConfigurationArn: {}", arn);
    Ok(())
}

/// Read and validate a type configuration document
///
/// Returns the file content unchanged. Only syntax is checked; the registry
/// validates the content against the hook schema.
pub(crate) fn read_configuration(path: &Path) -> cfn_hook_core::Result<String> {
    debug!("Reading type configuration from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            Error::invalid_config(format!("{} does not exist", path.display()))
        }
        _ => Error::invalid_config(format!("cannot read {}: {}", path.display(), e)),
    })?;

    serde_json::from_str::<IgnoredAny>(&content).map_err(|e| {
        Error::invalid_config(format!("{} is not valid JSON: {}", path.display(), e))
    })?;
    Ok(content)
}

/// Apply a configuration document to the hook; returns the configuration ARN
pub(crate) async fn configure(
    registry: &dyn HookRegistry,
    type_name: &str,
    configuration: &str,
) -> Result<String> {
    registry
        .set_type_configuration(
            &ConfigurationTarget::TypeName(type_name.to_string()),
            configuration,
        )
        .await
        .with_context(|| format!("Failed to set the type configuration of {}", type_name))
}
