//! Describe command

use anyhow::{Context, Result};
use cfn_hook_core::render::DescribeBundle;
use cfn_hook_core::targets::{build_target_mapping, needs_type_listing};
use cfn_hook_core::types::{
    pad_version_id, parse_schema_handlers, TestingStatus, TypeConfigurationDocument,
    VersionSummary,
};
use cfn_hook_registry::HookRegistry;
use tracing::debug;

use super::CommandContext;
use crate::cli::DescribeArgs;

pub async fn run(args: DescribeArgs, ctx: &CommandContext) -> Result<()> {
    let type_name = ctx.hook_type_name()?;
    let registry = ctx.registry().await?;

    let bundle = describe(&registry, &type_name, args.version_id.as_deref()).await?;
    print!("{}", bundle.render());
    Ok(())
}

/// Gather everything the describe report shows
pub(crate) async fn describe(
    registry: &dyn HookRegistry,
    type_name: &str,
    version_id: Option<&str>,
) -> Result<DescribeBundle> {
    let requested_version = version_id.map(pad_version_id);

    let default = registry
        .describe_type(type_name, None)
        .await
        .with_context(|| format!("Failed to describe {}", type_name))?;
    let default_version_id = default
        .default_version_id
        .clone()
        .with_context(|| format!("Registry did not report a default version for {type_name}"))?;

    let selected_version = requested_version
        .clone()
        .unwrap_or_else(|| default_version_id.clone());
    debug!("Selected {} version {}", type_name, selected_version);

    let versioned = registry
        .describe_type(type_name, Some(&selected_version))
        .await
        .with_context(|| format!("Failed to describe {type_name} version {selected_version}"))?;

    let document = match registry
        .describe_type_configuration(type_name)
        .await
        .with_context(|| format!("Failed to read the type configuration of {}", type_name))?
    {
        Some(json) => TypeConfigurationDocument::from_json(&json)?,
        None => {
            debug!(
                "No type configuration set for {}, using the unconfigured defaults",
                type_name
            );
            TypeConfigurationDocument::unconfigured()
        }
    };
    let configuration = document.hook().clone();

    let handlers = match versioned.schema.as_deref() {
        Some(schema) => parse_schema_handlers(schema)?,
        None => Vec::new(),
    };
    let known_types = if needs_type_listing(&handlers) {
        registry
            .list_resource_type_names()
            .await
            .context("Failed to list resource types")?
    } else {
        Vec::new()
    };
    let targets = build_target_mapping(
        &handlers,
        configuration.target_filters.as_ref(),
        &known_types,
    );

    Ok(DescribeBundle {
        type_name: type_name.to_string(),
        requested_version,
        summary: VersionSummary::from_description(selected_version, &versioned),
        default_version_id,
        configuration,
        targets,
        testing_status: versioned.tests_status.unwrap_or(TestingStatus::NotTested),
        testing_detail: versioned.tests_status_description.clone(),
    })
}
