//! Registry client trait

use async_trait::async_trait;
use cfn_hook_core::types::HookTypeDescription;
use cfn_hook_core::Result;

/// Type configuration alias every hook reads its configuration from
pub const DEFAULT_CONFIGURATION_ALIAS: &str = "default";

/// Public type activated by `enable-lambda-function-invoker`
pub const LAMBDA_INVOKER_TYPE_NAME: &str = "AWSSamples::LambdaFunctionInvoker::Hook";

/// Publisher of [`LAMBDA_INVOKER_TYPE_NAME`]
pub const LAMBDA_INVOKER_PUBLISHER_ID: &str = "096debcd443a84c983955f8f8476c221b2b08d8b";

/// Connection settings for the registry client
#[derive(Debug, Clone, Default)]
pub struct RegistryOptions {
    /// Named profile from the shared AWS config
    pub profile: Option<String>,

    /// Explicit region; overrides the profile / environment region
    pub region: Option<String>,

    /// CloudFormation endpoint override
    pub endpoint_url: Option<String>,
}

/// Which type a configuration is applied to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationTarget {
    /// A registered hook, by name
    TypeName(String),

    /// An activated type, by the ARN returned from activation
    TypeArn(String),
}

impl std::fmt::Display for ConfigurationTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigurationTarget::TypeName(name) => write!(f, "{}", name),
            ConfigurationTarget::TypeArn(arn) => write!(f, "{}", arn),
        }
    }
}

/// Activation of a public third-party hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivateTypeRequest {
    /// Public type name, as published
    pub type_name: String,
    pub publisher_id: String,
    pub execution_role_arn: Option<String>,
    pub type_name_alias: Option<String>,
}

impl ActivateTypeRequest {
    /// Activation of the Lambda function invoker hook
    pub fn lambda_invoker(execution_role_arn: Option<String>, alias: Option<String>) -> Self {
        Self {
            type_name: LAMBDA_INVOKER_TYPE_NAME.to_string(),
            publisher_id: LAMBDA_INVOKER_PUBLISHER_ID.to_string(),
            execution_role_arn,
            type_name_alias: alias,
        }
    }
}

/// Operations hook commands need from the CloudFormation registry
///
/// Every method is a single remote call (or a paginated series for
/// listings). Errors are already mapped into the core taxonomy.
#[async_trait]
pub trait HookRegistry: Send + Sync {
    /// Region the client operates in, if one could be resolved
    fn region(&self) -> Option<&str>;

    /// Describe a hook type; `None` describes the default version
    async fn describe_type(
        &self,
        type_name: &str,
        version_id: Option<&str>,
    ) -> Result<HookTypeDescription>;

    /// Raw JSON of the hook's default-alias type configuration
    ///
    /// `Ok(None)` when the registry returned no configuration entry.
    async fn describe_type_configuration(&self, type_name: &str) -> Result<Option<String>>;

    /// Make `version_id` the default version of a hook
    async fn set_type_default_version(&self, type_name: &str, version_id: &str) -> Result<()>;

    /// Apply a type configuration document; returns the configuration ARN
    async fn set_type_configuration(
        &self,
        target: &ConfigurationTarget,
        configuration: &str,
    ) -> Result<String>;

    /// Activate a public hook in this account; returns the activated type ARN
    async fn activate_type(&self, request: &ActivateTypeRequest) -> Result<String>;

    /// Names of all public resource types
    async fn list_resource_type_names(&self) -> Result<Vec<String>>;
}
