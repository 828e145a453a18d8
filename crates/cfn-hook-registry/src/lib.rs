//! # cfn-hook-registry
//!
//! Access to the CloudFormation registry for hook commands.
//!
//! [`HookRegistry`] is the seam the command handlers are written against;
//! [`CloudFormationRegistry`] implements it on the AWS SDK.

pub mod client;
pub mod cloudformation;
mod errors;

pub use client::{
    ActivateTypeRequest, ConfigurationTarget, HookRegistry, RegistryOptions,
    DEFAULT_CONFIGURATION_ALIAS, LAMBDA_INVOKER_PUBLISHER_ID, LAMBDA_INVOKER_TYPE_NAME,
};
pub use cloudformation::CloudFormationRegistry;
