//! Amazon Resource Name parsing
//!
//! Only the checks `enable-lambda-function-invoker` needs: well-formedness,
//! service, region and resource kind.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

static ARN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^arn:(aws[a-z-]*):([a-z0-9-]+):([a-z0-9-]*):(\d{12})?:(.+)$")
        .expect("ARN pattern is valid")
});

/// A parsed ARN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arn {
    pub partition: String,
    pub service: String,
    pub region: String,
    pub account_id: String,
    pub resource: String,
}

impl Arn {
    /// Parse an ARN, reporting failures against `argument`
    pub fn parse(value: &str, argument: &str) -> Result<Self> {
        let caps = ARN_PATTERN.captures(value.trim()).ok_or_else(|| {
            Error::invalid_argument(argument, format!("'{}' is not a well-formed ARN", value))
        })?;

        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str()).to_string();
        Ok(Self {
            partition: group(1),
            service: group(2),
            region: group(3),
            account_id: group(4),
            resource: group(5),
        })
    }

    /// Parse and check a Lambda function ARN
    ///
    /// Accepts qualified (`:alias` / `:version`) and unqualified function ARNs.
    pub fn lambda_function(value: &str, argument: &str) -> Result<Self> {
        let arn = Self::parse(value, argument)?;
        if arn.service != "lambda" || !arn.resource.starts_with("function:") {
            return Err(Error::invalid_argument(
                argument,
                format!("'{}' is not a Lambda function ARN", value),
            ));
        }
        if arn.region.is_empty() || arn.account_id.is_empty() {
            return Err(Error::invalid_argument(
                argument,
                format!("'{}' must include a region and account id", value),
            ));
        }
        Ok(arn)
    }

    /// Parse and check an IAM role ARN
    pub fn iam_role(value: &str, argument: &str) -> Result<Self> {
        let arn = Self::parse(value, argument)?;
        if arn.service != "iam" || !arn.resource.starts_with("role/") || arn.account_id.is_empty() {
            return Err(Error::invalid_argument(
                argument,
                format!("'{}' is not an IAM role ARN", value),
            ));
        }
        Ok(arn)
    }
}

impl std::fmt::Display for Arn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "arn:{}:{}:{}:{}:{}",
            self.partition, self.service, self.region, self.account_id, self.resource
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAMBDA_ARN: &str = "arn:aws:lambda:us-east-2:123456789012:function:my-function:1";
    const ROLE_ARN: &str = "arn:aws:iam::123456789012:role/my-role";

    #[test]
    fn test_parse_lambda_function_arn() {
        let arn = Arn::lambda_function(LAMBDA_ARN, "--lambda-function-arn").unwrap();
        assert_eq!(arn.partition, "aws");
        assert_eq!(arn.service, "lambda");
        assert_eq!(arn.region, "us-east-2");
        assert_eq!(arn.account_id, "123456789012");
        assert_eq!(arn.resource, "function:my-function:1");
        assert_eq!(arn.to_string(), LAMBDA_ARN);
    }

    #[test]
    fn test_parse_role_arn() {
        let arn = Arn::iam_role(ROLE_ARN, "--execution-role-arn").unwrap();
        assert_eq!(arn.region, "");
        assert_eq!(arn.resource, "role/my-role");
    }

    #[test]
    fn test_other_partitions() {
        let arn = Arn::lambda_function(
            "arn:aws-us-gov:lambda:us-gov-west-1:123456789012:function:f",
            "--lambda-function-arn",
        )
        .unwrap();
        assert_eq!(arn.partition, "aws-us-gov");
    }

    #[test]
    fn test_rejects_garbage() {
        let err = Arn::lambda_function("AnotherDummyLambdaArn", "--lambda-function-arn");
        match err.unwrap_err() {
            Error::InvalidArgument { argument, .. } => {
                assert_eq!(argument, "--lambda-function-arn")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_wrong_service() {
        assert!(Arn::lambda_function(ROLE_ARN, "--lambda-function-arn").is_err());
        assert!(Arn::iam_role(LAMBDA_ARN, "--execution-role-arn").is_err());
    }

    #[test]
    fn test_rejects_bad_account() {
        assert!(Arn::lambda_function(
            "arn:aws:lambda:us-east-1:1234:function:f",
            "--lambda-function-arn"
        )
        .is_err());
    }
}
