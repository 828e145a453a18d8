//! Hook type configuration document
//!
//! Mirrors the JSON stored by the registry for a hook type configuration:
//!
//! ```json
//! {
//!   "CloudFormationConfiguration": {
//!     "HookConfiguration": {
//!       "FailureMode": "FAIL",
//!       "TargetStacks": "ALL",
//!       "StackFilters": { "FilteringCriteria": "ANY", "StackNames": { "Include": ["a"] } },
//!       "Properties": { "MinBuckets": "1" },
//!       "TargetFilters": { "TargetNames": ["AWS::S3::Bucket"] }
//!     }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Top-level type configuration document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TypeConfigurationDocument {
    pub cloud_formation_configuration: CloudFormationConfiguration,
}

/// `CloudFormationConfiguration` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CloudFormationConfiguration {
    pub hook_configuration: HookConfiguration,
}

impl TypeConfigurationDocument {
    /// Wrap a hook configuration in the document envelope
    pub fn new(hook_configuration: HookConfiguration) -> Self {
        Self {
            cloud_formation_configuration: CloudFormationConfiguration { hook_configuration },
        }
    }

    /// Parse the configuration string returned by the registry
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            Error::remote(
                "BatchDescribeTypeConfigurations",
                format!("unexpected type configuration format: {e}"),
            )
        })
    }

    /// Serialize to the compact JSON the registry expects
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// The configuration the registry behaves as if set when none exists
    pub fn unconfigured() -> Self {
        Self::new(HookConfiguration {
            failure_mode: FailureMode::Warn,
            target_stacks: TargetStacks::None,
            stack_filters: None,
            properties: None,
            target_filters: None,
        })
    }

    /// The hook configuration section
    pub fn hook(&self) -> &HookConfiguration {
        &self.cloud_formation_configuration.hook_configuration
    }
}

/// Behavior configuration of a hook
///
/// Field order matters: it is the key order of the serialized document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HookConfiguration {
    pub failure_mode: FailureMode,

    pub target_stacks: TargetStacks,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_filters: Option<StackFilters>,

    /// Hook-specific configured properties, arbitrary JSON
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_filters: Option<TargetFilters>,
}

impl HookConfiguration {
    /// Configured properties, empty when none are set
    pub fn configured_properties(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.properties.iter().flat_map(|p| p.iter())
    }

    /// Whether any property is configured
    pub fn has_properties(&self) -> bool {
        self.properties.as_ref().is_some_and(|p| !p.is_empty())
    }
}

/// Whether a hook failure blocks the triggering operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FailureMode {
    #[default]
    Fail,
    Warn,
}

impl std::fmt::Display for FailureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureMode::Fail => write!(f, "FAIL"),
            FailureMode::Warn => write!(f, "WARN"),
        }
    }
}

impl std::str::FromStr for FailureMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "FAIL" => Ok(FailureMode::Fail),
            "WARN" => Ok(FailureMode::Warn),
            _ => Err(Error::invalid_argument(
                "--failure-mode",
                format!("'{s}' is not one of FAIL, WARN"),
            )),
        }
    }
}

/// Which stacks the hook applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TargetStacks {
    All,
    None,
    /// Only stacks selected by the stack filters
    Specific,
}

impl std::fmt::Display for TargetStacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetStacks::All => write!(f, "ALL"),
            TargetStacks::None => write!(f, "NONE"),
            TargetStacks::Specific => write!(f, "SPECIFIC"),
        }
    }
}

/// Stack-level scoping rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StackFilters {
    pub filtering_criteria: FilteringCriteria,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_names: Option<IncludeExclude>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_roles: Option<IncludeExclude>,
}

/// How multiple stack filters combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FilteringCriteria {
    All,
    Any,
}

impl std::fmt::Display for FilteringCriteria {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilteringCriteria::All => write!(f, "ALL"),
            FilteringCriteria::Any => write!(f, "ANY"),
        }
    }
}

/// Include / exclude name lists of a stack filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IncludeExclude {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

/// Target-level scoping rules
///
/// Either explicit `Targets` triples, or any combination of name / action /
/// invocation point lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TargetFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<TargetFilter>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_names: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<HookAction>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invocation_points: Option<Vec<InvocationPoint>>,
}

/// One explicit target triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TargetFilter {
    pub target_name: String,
    pub action: HookAction,
    pub invocation_point: InvocationPoint,
}

/// Resource operation a hook handler runs for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HookAction {
    Create,
    Update,
    Delete,
}

/// When during provisioning a hook handler runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvocationPoint {
    PreProvision,
}
