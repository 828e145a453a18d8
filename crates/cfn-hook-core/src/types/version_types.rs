//! Hook type and version descriptions

use chrono::{DateTime, Utc};

/// Hook type as reported by the registry's DescribeType
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HookTypeDescription {
    /// Type ARN
    pub arn: Option<String>,

    /// Type name, e.g. `MyCompany::Testing::MyTestHook`
    pub type_name: String,

    /// Default version of the type in this account and region
    pub default_version_id: Option<String>,

    /// Whether the described version is the default one
    pub is_default_version: bool,

    /// Type description
    pub description: Option<String>,

    /// Raw hook schema document
    pub schema: Option<String>,

    /// When this version was registered
    pub time_created: Option<DateTime<Utc>>,

    /// When this version was last updated
    pub last_updated: Option<DateTime<Utc>>,

    /// Contract test status of this version
    pub tests_status: Option<TestingStatus>,

    /// Registry-provided explanation of the test status
    pub tests_status_description: Option<String>,
}

/// Summary of one hook version, as shown by `describe`
#[derive(Debug, Clone, PartialEq)]
pub struct VersionSummary {
    pub version_id: String,
    pub description: Option<String>,
    pub time_created: Option<DateTime<Utc>>,
    pub last_updated: Option<DateTime<Utc>>,
    pub is_default_version: bool,
}

impl VersionSummary {
    /// Build the summary of `version_id` from its DescribeType response
    pub fn from_description(version_id: impl Into<String>, desc: &HookTypeDescription) -> Self {
        Self {
            version_id: version_id.into(),
            description: desc.description.clone(),
            time_created: desc.time_created,
            last_updated: desc.last_updated,
            is_default_version: desc.is_default_version,
        }
    }
}

const IN_PROGRESS: &str =
    "Testing of this Type version is still in progress. Run describe again once it completes.";

const FAILED_WITHOUT_DETAIL: &str =
    "This Type version failed its contract tests. Fix the handlers and run TestType again.";

/// Contract test status of a hook version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestingStatus {
    NotTested,
    InProgress,
    Passed,
    Failed,
}

impl TestingStatus {
    /// Whether `describe` should print a warning for this status
    pub fn needs_warning(&self) -> bool {
        !matches!(self, TestingStatus::Passed)
    }

    /// Warning wording for a status that is not PASSED
    ///
    /// `detail` is the registry's status description; it is appended for
    /// failures, where it usually names the failing contract test.
    pub fn warning(&self, detail: Option<&str>) -> Option<String> {
        match self {
            TestingStatus::Passed => None,
            TestingStatus::NotTested => Some(
                "This Type version hasn't been tested yet. Run TestType to test it.".to_string(),
            ),
            TestingStatus::InProgress => Some(IN_PROGRESS.to_string()),
            TestingStatus::Failed => match detail.map(str::trim).filter(|d| !d.is_empty()) {
                Some(detail) => Some(format!(
                    "This Type version failed its contract tests: {detail}"
                )),
                None => Some(FAILED_WITHOUT_DETAIL.to_string()),
            },
        }
    }
}

impl std::fmt::Display for TestingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestingStatus::NotTested => write!(f, "NOT_TESTED"),
            TestingStatus::InProgress => write!(f, "IN_PROGRESS"),
            TestingStatus::Passed => write!(f, "PASSED"),
            TestingStatus::Failed => write!(f, "FAILED"),
        }
    }
}

impl std::str::FromStr for TestingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOT_TESTED" => Ok(TestingStatus::NotTested),
            "IN_PROGRESS" => Ok(TestingStatus::InProgress),
            "PASSED" => Ok(TestingStatus::Passed),
            "FAILED" => Ok(TestingStatus::Failed),
            _ => Err(format!("Unknown testing status: {}", s)),
        }
    }
}

/// Normalize a user-supplied version id to the registry's 8-digit form
///
/// `"2"` becomes `"00000002"`; longer ids are returned unchanged.
pub fn pad_version_id(version_id: &str) -> String {
    format!("{:0>8}", version_id.trim())
}
