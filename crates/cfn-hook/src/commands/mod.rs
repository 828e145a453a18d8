//! CLI command implementations
//!
//! Each command has a `run` entry point that resolves its inputs and prints,
//! and a registry-generic core that the tests drive with a fake registry.

pub mod completions;
pub mod configure;
pub mod describe;
pub mod enable_lambda_invoker;
pub mod set_default_version;

#[cfg(test)]
pub(crate) mod fake;

use std::path::PathBuf;

use anyhow::{Context, Result};
use cfn_hook_core::project::resolve_type_name;
use cfn_hook_registry::{CloudFormationRegistry, RegistryOptions};

use crate::cli::Cli;
use crate::features::Features;

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub registry_options: RegistryOptions,
    pub type_name: Option<String>,
    pub project_dir: PathBuf,
    pub features: Features,
}

impl CommandContext {
    pub fn from_cli(cli: &Cli, features: Features) -> Self {
        Self {
            registry_options: RegistryOptions {
                profile: cli.profile.clone(),
                region: cli.region.clone(),
                endpoint_url: cli.endpoint_url.clone(),
            },
            type_name: cli.type_name.clone(),
            project_dir: cli.project_dir.clone(),
            features,
        }
    }

    /// The hook type name the command acts on
    pub fn hook_type_name(&self) -> Result<String> {
        Ok(resolve_type_name(
            self.type_name.as_deref(),
            &self.project_dir,
        )?)
    }

    /// Registry client for the configured profile / region / endpoint
    pub async fn registry(&self) -> Result<CloudFormationRegistry> {
        CloudFormationRegistry::new(&self.registry_options)
            .await
            .context("Failed to create CloudFormation client")
    }
}
