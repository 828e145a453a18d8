//! Error types for cfn-hook-core

use thiserror::Error;

/// Result type alias using cfn-hook-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by hook commands
#[derive(Error, Debug)]
pub enum Error {
    /// Referenced hook type, version or type configuration does not exist
    #[error("{message}")]
    NotFound { message: String },

    /// Caller lacks permission for the registry operation
    #[error("Not authorized to {operation}: {message}")]
    Authorization { operation: String, message: String },

    /// Configuration document missing, unreadable or not valid JSON
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Malformed ARN or flag value
    #[error("Invalid argument {argument}: {message}")]
    InvalidArgument { argument: String, message: String },

    /// Lambda function lives in a different region than the one we operate in
    #[error(
        "Lambda function region {function_region} does not match operating region {operating_region}. \
         Pass --region {function_region} to operate in the function's region"
    )]
    RegionMismatch {
        function_region: String,
        operating_region: String,
    },

    /// Experimental command invoked without the environment toggle
    #[error("'{command}' is experimental. Set {env_var}=enabled to use it")]
    FeatureDisabled { command: String, env_var: String },

    /// Any other failure returned by the registry
    #[error("{operation} failed: {message}")]
    RemoteService { operation: String, message: String },

    /// No project file in the working directory
    #[error("Project file not found: {path}. Run inside a hook project or pass --type-name")]
    ProjectNotFound { path: String },

    /// Project file exists but cannot be used
    #[error("Invalid project file {path}: {message}")]
    InvalidProject { path: String, message: String },

    /// Hook schema returned by the registry cannot be interpreted
    #[error("Invalid hook schema: {message}")]
    InvalidSchema { message: String },

    /// Command aborted by Ctrl-C
    #[error("Interrupted: {message}")]
    Interrupted { message: String },

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl Error {
    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an authorization error
    pub fn authorization(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Authorization {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(argument: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            message: message.into(),
        }
    }

    /// Create a region mismatch error
    pub fn region_mismatch(
        function_region: impl Into<String>,
        operating_region: impl Into<String>,
    ) -> Self {
        Self::RegionMismatch {
            function_region: function_region.into(),
            operating_region: operating_region.into(),
        }
    }

    /// Create a feature disabled error
    pub fn feature_disabled(command: impl Into<String>, env_var: impl Into<String>) -> Self {
        Self::FeatureDisabled {
            command: command.into(),
            env_var: env_var.into(),
        }
    }

    /// Create a remote service error
    pub fn remote(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RemoteService {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a project not found error
    pub fn project_not_found(path: impl Into<String>) -> Self {
        Self::ProjectNotFound { path: path.into() }
    }

    /// Create an invalid project error
    pub fn invalid_project(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidProject {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid schema error
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Self::InvalidSchema {
            message: message.into(),
        }
    }

    /// Create an interrupted error
    pub fn interrupted(message: impl Into<String>) -> Self {
        Self::Interrupted {
            message: message.into(),
        }
    }

    /// Process exit code for this error
    ///
    /// 130 mirrors the shell convention for SIGINT so wrappers can retry.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Interrupted { .. } => 130,
            _ => 1,
        }
    }
}
