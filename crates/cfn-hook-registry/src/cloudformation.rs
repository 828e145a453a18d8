//! CloudFormation registry backend
//!
//! Implements [`HookRegistry`] on the AWS SDK. Works against any endpoint
//! speaking the CloudFormation API (`--endpoint-url`).

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_cloudformation::config::Region;
use aws_sdk_cloudformation::primitives::DateTime as SmithyDateTime;
use aws_sdk_cloudformation::types::{
    RegistryType, ThirdPartyType, TypeConfigurationIdentifier, Visibility,
};
use aws_sdk_cloudformation::Client;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use cfn_hook_core::types::HookTypeDescription;
use cfn_hook_core::{Error, Result};

use crate::client::{
    ActivateTypeRequest, ConfigurationTarget, HookRegistry, RegistryOptions,
    DEFAULT_CONFIGURATION_ALIAS,
};
use crate::errors::{classify, from_sdk};

const TYPE_CONFIGURATION_NOT_FOUND: &str =
    "Describing type configuration resulted in TypeConfigurationNotFoundException. \
     Have you set a type configuration for this hook?";

const LIST_TYPES_PAGE_SIZE: i32 = 100;

/// Registry client backed by `aws-sdk-cloudformation`
pub struct CloudFormationRegistry {
    client: Client,
    region: Option<String>,
}

impl CloudFormationRegistry {
    /// Create a client from the shared AWS configuration plus overrides
    pub async fn new(options: &RegistryOptions) -> Result<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &options.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &options.profile {
            loader = loader.profile_name(profile);
        }
        let sdk_config = loader.load().await;

        let mut builder = aws_sdk_cloudformation::config::Builder::from(&sdk_config);
        if let Some(endpoint_url) = &options.endpoint_url {
            debug!("Using custom CloudFormation endpoint: {}", endpoint_url);
            builder = builder.endpoint_url(endpoint_url);
        }

        let region = sdk_config.region().map(|r| r.to_string());
        debug!("CloudFormation client region: {:?}", region);

        Ok(Self::from_client(Client::from_conf(builder.build()), region))
    }

    /// Wrap an already configured SDK client
    pub fn from_client(client: Client, region: Option<String>) -> Self {
        Self { client, region }
    }
}

#[async_trait]
impl HookRegistry for CloudFormationRegistry {
    fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    async fn describe_type(
        &self,
        type_name: &str,
        version_id: Option<&str>,
    ) -> Result<HookTypeDescription> {
        debug!(
            "Calling DescribeType for {} (version {})",
            type_name,
            version_id.unwrap_or("default")
        );
        let output = self
            .client
            .describe_type()
            .r#type(RegistryType::Hook)
            .type_name(type_name)
            .set_version_id(version_id.map(str::to_string))
            .send()
            .await
            .map_err(|e| from_sdk("DescribeType", e, &type_not_found_message(version_id)))?;
        debug!("Successful response from DescribeType");

        Ok(HookTypeDescription {
            arn: output.arn().map(str::to_string),
            type_name: output.type_name().unwrap_or(type_name).to_string(),
            default_version_id: output.default_version_id().map(str::to_string),
            is_default_version: output.is_default_version().unwrap_or(false),
            description: output.description().map(str::to_string),
            schema: output.schema().map(str::to_string),
            time_created: output.time_created().and_then(to_chrono),
            last_updated: output.last_updated().and_then(to_chrono),
            tests_status: output
                .type_tests_status()
                .and_then(|s| s.as_str().parse().ok()),
            tests_status_description: output.type_tests_status_description().map(str::to_string),
        })
    }

    async fn describe_type_configuration(&self, type_name: &str) -> Result<Option<String>> {
        debug!(
            "Calling BatchDescribeTypeConfigurations for {} and configuration alias {}",
            type_name, DEFAULT_CONFIGURATION_ALIAS
        );
        let identifier = TypeConfigurationIdentifier::builder()
            .r#type(ThirdPartyType::Hook)
            .type_name(type_name)
            .type_configuration_alias(DEFAULT_CONFIGURATION_ALIAS)
            .build();
        let output = self
            .client
            .batch_describe_type_configurations()
            .type_configuration_identifiers(identifier)
            .send()
            .await
            .map_err(|e| {
                from_sdk(
                    "BatchDescribeTypeConfigurations",
                    e,
                    TYPE_CONFIGURATION_NOT_FOUND,
                )
            })?;
        debug!("Successful response from BatchDescribeTypeConfigurations");

        // Per-identifier failures come back in the body, not as a call error
        if output.type_configurations().is_empty() {
            if let Some(failure) = output.errors().first() {
                return Err(classify(
                    "BatchDescribeTypeConfigurations",
                    failure.error_code(),
                    failure.error_message().unwrap_or("unknown error"),
                    TYPE_CONFIGURATION_NOT_FOUND,
                ));
            }
        }

        Ok(output
            .type_configurations()
            .first()
            .and_then(|c| c.configuration())
            .map(str::to_string))
    }

    async fn set_type_default_version(&self, type_name: &str, version_id: &str) -> Result<()> {
        debug!(
            "Calling SetTypeDefaultVersion for {} version {}",
            type_name, version_id
        );
        self.client
            .set_type_default_version()
            .r#type(RegistryType::Hook)
            .type_name(type_name)
            .version_id(version_id)
            .send()
            .await
            .map_err(|e| {
                from_sdk(
                    "SetTypeDefaultVersion",
                    e,
                    &format!(
                        "Setting default version to {} resulted in TypeNotFoundException. \
                         Have you registered this version of the hook?",
                        version_id
                    ),
                )
            })?;
        info!("Set default version of {} to {}", type_name, version_id);
        Ok(())
    }

    async fn set_type_configuration(
        &self,
        target: &ConfigurationTarget,
        configuration: &str,
    ) -> Result<String> {
        debug!("Calling SetTypeConfiguration for {}", target);
        let request = self
            .client
            .set_type_configuration()
            .configuration(configuration);
        let request = match target {
            ConfigurationTarget::TypeName(name) => {
                request.r#type(ThirdPartyType::Hook).type_name(name)
            }
            ConfigurationTarget::TypeArn(arn) => request.type_arn(arn),
        };
        let output = request.send().await.map_err(|e| {
            from_sdk(
                "SetTypeConfiguration",
                e,
                "Setting type configuration resulted in TypeNotFoundException. \
                 Have you registered this hook first?",
            )
        })?;

        let arn = output
            .configuration_arn()
            .ok_or_else(|| {
                Error::remote(
                    "SetTypeConfiguration",
                    "response did not include a configuration ARN",
                )
            })?
            .to_string();
        info!("Type configuration of {} set: {}", target, arn);
        Ok(arn)
    }

    async fn activate_type(&self, request: &ActivateTypeRequest) -> Result<String> {
        debug!(
            "Calling ActivateType for {} (publisher {}, alias {:?})",
            request.type_name, request.publisher_id, request.type_name_alias
        );
        let output = self
            .client
            .activate_type()
            .r#type(ThirdPartyType::Hook)
            .type_name(&request.type_name)
            .publisher_id(&request.publisher_id)
            .set_execution_role_arn(request.execution_role_arn.clone())
            .set_type_name_alias(request.type_name_alias.clone())
            .send()
            .await
            .map_err(|e| {
                from_sdk(
                    "ActivateType",
                    e,
                    &format!(
                        "Activating {} resulted in TypeNotFoundException. \
                         Is the type published in this region?",
                        request.type_name
                    ),
                )
            })?;

        let arn = output
            .arn()
            .ok_or_else(|| Error::remote("ActivateType", "response did not include a type ARN"))?
            .to_string();
        info!("Activated {} as {}", request.type_name, arn);
        Ok(arn)
    }

    async fn list_resource_type_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            debug!("Calling ListTypes (next token: {:?})", next_token);
            let output = self
                .client
                .list_types()
                .r#type(RegistryType::Resource)
                .visibility(Visibility::Public)
                .max_results(LIST_TYPES_PAGE_SIZE)
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| from_sdk("ListTypes", e, "Listing resource types failed"))?;

            names.extend(
                output
                    .type_summaries()
                    .iter()
                    .filter_map(|summary| summary.type_name())
                    .map(str::to_string),
            );

            match output.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        debug!("Listed {} resource types", names.len());
        Ok(names)
    }
}

fn type_not_found_message(version_id: Option<&str>) -> String {
    match version_id {
        None => "Describing type resulted in TypeNotFoundException. \
                 This type does not seem to exist in your account in this region. \
                 Have you registered this hook?"
            .to_string(),
        Some(version) => format!(
            "Describing type with version id {} resulted in TypeNotFoundException. \
             This specific version does not seem to exist in your account in this region.",
            version
        ),
    }
}

fn to_chrono(value: &SmithyDateTime) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(value.secs(), value.subsec_nanos())
}
