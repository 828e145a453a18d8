//! Enable-lambda-function-invoker command (experimental)
//!
//! Activates the public `AWSSamples::LambdaFunctionInvoker::Hook` in the
//! account and configures it to call one Lambda function. Activation and
//! configuration are two separate calls; a failure in the second leaves the
//! type activated and the error says so.

use anyhow::{Context, Result};
use cfn_hook_core::arn::Arn;
use cfn_hook_core::types::{
    FailureMode, HookAction, HookConfiguration, InvocationPoint, TargetFilters, TargetStacks,
    TypeConfigurationDocument,
};
use cfn_hook_core::Error;
use cfn_hook_registry::{
    ActivateTypeRequest, ConfigurationTarget, HookRegistry, LAMBDA_INVOKER_TYPE_NAME,
};
use dialoguer::Confirm;
use serde_json::{json, Map};
use tracing::debug;

use super::CommandContext;
use crate::cli::{EnableLambdaInvokerArgs, ENABLE_LAMBDA_INVOKER};
use crate::features::{Features, EXPERIMENTAL_ENV};
use crate::output;

pub async fn run(args: EnableLambdaInvokerArgs, ctx: &CommandContext) -> Result<()> {
    ensure_enabled(&ctx.features)?;
    let request = InvokerRequest::from_args(&args)?;

    let registry = ctx.registry().await?;
    check_region(&request.lambda_function, registry.region())?;

    if request.include_targets.is_none() && !args.yes {
        output::warning(&format!(
            "No --include-targets given: {} will be invoked for every resource type",
            request.lambda_function
        ));
        let confirmed = Confirm::new()
            .with_prompt("Activate the Lambda function invoker for ALL resources?")
            .default(false)
            .interact()?;

        if !confirmed {
            output::info("Cancelled");
            return Ok(());
        }
    }

    let message = enable(&registry, &request).await?;
    println!("{}", message);
    Ok(())
}

/// Reject the command unless experimental features are on
pub(crate) fn ensure_enabled(features: &Features) -> cfn_hook_core::Result<()> {
    if features.lambda_invoker {
        Ok(())
    } else {
        Err(Error::feature_disabled(ENABLE_LAMBDA_INVOKER, EXPERIMENTAL_ENV))
    }
}

/// Validated command input
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct InvokerRequest {
    pub lambda_function: Arn,
    pub execution_role: Arn,
    pub failure_mode: FailureMode,
    pub alias: Option<String>,
    pub include_targets: Option<Vec<String>>,
}

impl InvokerRequest {
    pub fn from_args(args: &EnableLambdaInvokerArgs) -> cfn_hook_core::Result<Self> {
        let lambda_function =
            Arn::lambda_function(&args.lambda_function_arn, "--lambda-function-arn")?;
        let execution_role = Arn::iam_role(&args.execution_role_arn, "--execution-role-arn")?;
        let failure_mode: FailureMode = args.failure_mode.parse()?;

        let alias = args.alias.as_deref().map(validate_alias).transpose()?;
        let include_targets = args
            .include_targets
            .as_deref()
            .map(parse_include_targets)
            .transpose()?;

        Ok(Self {
            lambda_function,
            execution_role,
            failure_mode,
            alias,
            include_targets,
        })
    }

    /// Name the hook is known by once activated
    pub fn hook_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(LAMBDA_INVOKER_TYPE_NAME)
    }

    /// Type configuration applied after activation
    pub fn configuration(&self) -> TypeConfigurationDocument {
        let mut properties = Map::new();
        properties.insert(
            "LambdaFunctions".to_string(),
            json!([self.lambda_function.to_string()]),
        );

        let target_filters = self.include_targets.as_ref().map(|names| TargetFilters {
            targets: None,
            target_names: Some(names.clone()),
            actions: Some(vec![HookAction::Create, HookAction::Update]),
            invocation_points: Some(vec![InvocationPoint::PreProvision]),
        });

        TypeConfigurationDocument::new(HookConfiguration {
            failure_mode: self.failure_mode,
            target_stacks: TargetStacks::All,
            stack_filters: None,
            properties: Some(properties),
            target_filters,
        })
    }

    fn scope(&self) -> String {
        match &self.include_targets {
            Some(names) => names.join(","),
            None => "ALL".to_string(),
        }
    }
}

/// Type name aliases have the same three-part shape as type names
fn validate_alias(alias: &str) -> cfn_hook_core::Result<String> {
    let alias = alias.trim();
    let parts: Vec<&str> = alias.split("::").collect();
    if parts.len() != 3 || parts.iter().any(|p| p.trim().is_empty()) {
        return Err(Error::invalid_argument(
            "--alias",
            format!("'{}' must look like Organization::Service::Hook", alias),
        ));
    }
    Ok(alias.to_string())
}

fn parse_include_targets(value: &str) -> cfn_hook_core::Result<Vec<String>> {
    let names: Vec<String> = value.split(',').map(|s| s.trim().to_string()).collect();
    if names.iter().any(String::is_empty) {
        return Err(Error::invalid_argument(
            "--include-targets",
            format!("'{}' contains an empty resource type", value),
        ));
    }
    Ok(names)
}

/// The function must live in the region the hook is activated in
pub(crate) fn check_region(
    lambda_function: &Arn,
    operating_region: Option<&str>,
) -> cfn_hook_core::Result<()> {
    let operating_region = operating_region.ok_or_else(|| {
        Error::invalid_argument(
            "--region",
            "no region configured; pass --region or set one in your AWS profile",
        )
    })?;
    if lambda_function.region != operating_region {
        return Err(Error::region_mismatch(lambda_function.region.clone(), operating_region));
    }
    Ok(())
}

/// Activate the invoker hook and configure it; returns the success message
pub(crate) async fn enable(
    registry: &dyn HookRegistry,
    request: &InvokerRequest,
) -> Result<String> {
    let activation = ActivateTypeRequest::lambda_invoker(
        Some(request.execution_role.to_string()),
        request.alias.clone(),
    );
    let type_arn = registry
        .activate_type(&activation)
        .await
        .with_context(|| format!("Failed to activate {}", LAMBDA_INVOKER_TYPE_NAME))?;
    debug!("Activated {} as {}", request.hook_name(), type_arn);

    let configuration = request.configuration().to_json()?;
    registry
        .set_type_configuration(
            &ConfigurationTarget::TypeArn(type_arn.clone()),
            &configuration,
        )
        .await
        .with_context(|| {
            format!(
                "{} was activated as {} but configuring it failed; \
                 run the command again or set its configuration with `configure`",
                request.hook_name(),
                type_arn
            )
        })?;

    Ok(format!(
        "Success: {} will now be invoked for CloudFormation deployments for {} resources in {} mode.",
        request.hook_name(),
        request.scope(),
        request.failure_mode
    ))
}
