//! Mapping of registry error codes into the core error taxonomy

use aws_sdk_cloudformation::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use cfn_hook_core::Error;

const NOT_FOUND_CODES: &[&str] = &[
    "TypeNotFoundException",
    "TypeConfigurationNotFoundException",
];

const AUTHORIZATION_CODES: &[&str] = &[
    "AccessDenied",
    "AccessDeniedException",
    "UnrecognizedClientException",
    "InvalidClientTokenId",
    "ExpiredToken",
    "ExpiredTokenException",
];

/// Classify a failed call by its error code
pub(crate) fn classify(
    operation: &str,
    code: Option<&str>,
    message: &str,
    not_found_message: &str,
) -> Error {
    match code {
        Some(code) if NOT_FOUND_CODES.contains(&code) => Error::not_found(not_found_message),
        Some(code) if AUTHORIZATION_CODES.contains(&code) => {
            Error::authorization(operation, message)
        }
        _ => Error::remote(operation, message),
    }
}

/// Map an SDK failure of `operation`
pub(crate) fn from_sdk<E, R>(
    operation: &str,
    err: SdkError<E, R>,
    not_found_message: &str,
) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    let message = match err.message() {
        Some(message) => message.to_string(),
        None => DisplayErrorContext(&err).to_string(),
    };
    classify(operation, err.code(), &message, not_found_message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_uses_supplied_message() {
        let err = classify(
            "DescribeType",
            Some("TypeNotFoundException"),
            "Type not found",
            "This type does not seem to exist",
        );
        match err {
            Error::NotFound { message } => assert_eq!(message, "This type does not seem to exist"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_access_denied_is_authorization() {
        let err = classify("SetTypeDefaultVersion", Some("AccessDenied"), "denied", "");
        match err {
            Error::Authorization { operation, message } => {
                assert_eq!(operation, "SetTypeDefaultVersion");
                assert_eq!(message, "denied");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_code_is_remote() {
        let err = classify(
            "ActivateType",
            Some("ThrottlingException"),
            "Rate exceeded",
            "",
        );
        assert!(matches!(err, Error::RemoteService { .. }));
        assert_eq!(err.to_string(), "ActivateType failed: Rate exceeded");
    }

    #[test]
    fn test_missing_code_is_remote() {
        let err = classify("ListTypes", None, "dispatch failure", "");
        assert!(matches!(err, Error::RemoteService { .. }));
    }
}
