//! In-memory registry for command tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use cfn_hook_core::types::HookTypeDescription;
use cfn_hook_core::{Error, Result};
use cfn_hook_registry::{ActivateTypeRequest, ConfigurationTarget, HookRegistry};

pub const CONFIGURATION_ARN: &str =
    "arn:aws:cloudformation:us-east-1:123456789012:type-configuration/hook/Random-Type-Name/default";
pub const ACTIVATED_TYPE_ARN: &str =
    "arn:aws:cloudformation:us-east-1:123456789012:type/hook/AWSSamples-LambdaFunctionInvoker-Hook";

/// A registry call, with its arguments
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    DescribeType(Option<String>),
    DescribeTypeConfiguration,
    SetTypeDefaultVersion(String),
    SetTypeConfiguration(ConfigurationTarget, String),
    ActivateType(ActivateTypeRequest),
    ListResourceTypeNames,
}

impl Call {
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Call::SetTypeDefaultVersion(_) | Call::SetTypeConfiguration(..) | Call::ActivateType(_)
        )
    }
}

#[derive(Default)]
pub struct FakeRegistry {
    pub region: Option<String>,
    pub default_version: String,
    pub versions: HashMap<String, HookTypeDescription>,
    pub configuration: Option<String>,
    pub resource_types: Vec<String>,
    pub fail_set_configuration: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakeRegistry {
    pub fn new(region: &str) -> Self {
        Self {
            region: Some(region.to_string()),
            ..Default::default()
        }
    }

    /// Register a version; the first one added becomes the default
    pub fn with_version(mut self, version_id: &str, description: HookTypeDescription) -> Self {
        if self.default_version.is_empty() {
            self.default_version = version_id.to_string();
        }
        self.versions.insert(version_id.to_string(), description);
        self
    }

    pub fn with_configuration(mut self, configuration: &str) -> Self {
        self.configuration = Some(configuration.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl HookRegistry for FakeRegistry {
    fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    async fn describe_type(
        &self,
        _type_name: &str,
        version_id: Option<&str>,
    ) -> Result<HookTypeDescription> {
        self.record(Call::DescribeType(version_id.map(str::to_string)));
        let version = version_id.unwrap_or(&self.default_version);
        self.versions
            .get(version)
            .cloned()
            .map(|mut desc| {
                desc.default_version_id = Some(self.default_version.clone());
                desc.is_default_version = version == self.default_version;
                desc
            })
            .ok_or_else(|| Error::not_found(format!("version {version} does not exist")))
    }

    async fn describe_type_configuration(&self, _type_name: &str) -> Result<Option<String>> {
        self.record(Call::DescribeTypeConfiguration);
        Ok(self.configuration.clone())
    }

    async fn set_type_default_version(&self, _type_name: &str, version_id: &str) -> Result<()> {
        self.record(Call::SetTypeDefaultVersion(version_id.to_string()));
        if self.versions.contains_key(version_id) {
            Ok(())
        } else {
            Err(Error::not_found(format!("version {version_id} does not exist")))
        }
    }

    async fn set_type_configuration(
        &self,
        target: &ConfigurationTarget,
        configuration: &str,
    ) -> Result<String> {
        self.record(Call::SetTypeConfiguration(
            target.clone(),
            configuration.to_string(),
        ));
        if self.fail_set_configuration {
            return Err(Error::authorization(
                "SetTypeConfiguration",
                "User is not authorized to perform: cloudformation:SetTypeConfiguration",
            ));
        }
        Ok(CONFIGURATION_ARN.to_string())
    }

    async fn activate_type(&self, request: &ActivateTypeRequest) -> Result<String> {
        self.record(Call::ActivateType(request.clone()));
        Ok(ACTIVATED_TYPE_ARN.to_string())
    }

    async fn list_resource_type_names(&self) -> Result<Vec<String>> {
        self.record(Call::ListResourceTypeNames);
        Ok(self.resource_types.clone())
    }
}
