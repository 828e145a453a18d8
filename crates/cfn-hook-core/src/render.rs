//! Text rendering of `describe` results
//!
//! The report is a fixed sequence of sections rendered from an immutable
//! [`DescribeBundle`]. Each section decides on its own whether it has anything
//! to print. Indentation is two spaces per level.

use std::fmt::{self, Write as _};

use chrono::{DateTime, Timelike, Utc};
use serde_json::Value;

use crate::types::{
    HookConfiguration, IncludeExclude, StackFilters, TargetTypeMapping, TestingStatus,
    VersionSummary,
};

/// Handlers with more targets than this print a count instead of the list
pub const MAX_LISTED_TARGETS: usize = 5;

const INDENT: &str = "  ";

/// Everything `describe` shows about one hook version
#[derive(Debug, Clone, PartialEq)]
pub struct DescribeBundle {
    pub type_name: String,

    /// Version id passed on the command line, if any
    pub requested_version: Option<String>,

    /// The version that was actually described
    pub summary: VersionSummary,

    /// Account default version; the configuration applies to this one
    pub default_version_id: String,

    pub configuration: HookConfiguration,

    pub targets: TargetTypeMapping,

    pub testing_status: TestingStatus,

    /// Registry explanation of the testing status
    pub testing_detail: Option<String>,
}

impl DescribeBundle {
    /// Render the human-readable report
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DescribeBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_selection(f, self)?;
        write_version(f, &self.summary)?;
        write_behavior(f, &self.default_version_id, &self.configuration)?;
        if let Some(filters) = &self.configuration.stack_filters {
            write_stack_filters(f, filters)?;
        }
        write!(f, "\n{INDENT}")?;
        write_properties(f, &self.configuration)?;
        writeln!(f)?;
        writeln!(f)?;
        write_targets(f, &self.targets)?;
        writeln!(f)?;
        write_testing_status(f, self.testing_status, self.testing_detail.as_deref())
    }
}

fn write_selection(f: &mut fmt::Formatter<'_>, bundle: &DescribeBundle) -> fmt::Result {
    if bundle.requested_version.is_none() {
        writeln!(f, "\nNo version specified, using default version")?;
    }
    writeln!(
        f,
        "\nSelected {} version {}",
        bundle.type_name, bundle.summary.version_id
    )
}

fn write_version(f: &mut fmt::Formatter<'_>, summary: &VersionSummary) -> fmt::Result {
    let version = &summary.version_id;
    writeln!(
        f,
        "\nDescription: {}",
        summary.description.as_deref().unwrap_or_default()
    )?;
    writeln!(
        f,
        "Version {} Created at: {}",
        version,
        timestamp(summary.time_created)
    )?;
    writeln!(
        f,
        "Version {} Last updated at: {}",
        version,
        timestamp(summary.last_updated)
    )
}

fn write_behavior(
    f: &mut fmt::Formatter<'_>,
    default_version_id: &str,
    configuration: &HookConfiguration,
) -> fmt::Result {
    writeln!(f, "\nCurrent configuration (only applies to default version):")?;
    writeln!(f, "{INDENT}Default version: {default_version_id}")?;
    writeln!(f, "{INDENT}Configured behavior:")?;
    writeln!(f, "{}Failure mode: {}", indent(2), configuration.failure_mode)?;
    writeln!(f, "{}Target stacks: {}", indent(2), configuration.target_stacks)
}

fn write_stack_filters(f: &mut fmt::Formatter<'_>, filters: &StackFilters) -> fmt::Result {
    writeln!(f, "{}Stack Filters:", indent(2))?;
    writeln!(
        f,
        "{}Filtering Criteria: {}",
        indent(3),
        filters.filtering_criteria
    )?;
    let groups = [
        ("StackNames", filters.stack_names.as_ref()),
        ("StackRoles", filters.stack_roles.as_ref()),
    ];
    for (label, group) in groups {
        if let Some(group) = group {
            write_include_exclude(f, label, group)?;
        }
    }
    Ok(())
}

fn write_include_exclude(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    group: &IncludeExclude,
) -> fmt::Result {
    writeln!(f, "{}{}:", indent(3), label)?;
    if !group.include.is_empty() {
        writeln!(f, "{}Include: {}", indent(4), quoted_list(&group.include))?;
    }
    if !group.exclude.is_empty() {
        writeln!(f, "{}Exclude: {}", indent(4), quoted_list(&group.exclude))?;
    }
    Ok(())
}

/// Configured properties as a two-column table
///
/// ```text
/// Configured properties:
///     Property   | Value
///     ---------------------
///     MinQueues  | 1
/// ```
fn write_properties(f: &mut fmt::Formatter<'_>, configuration: &HookConfiguration) -> fmt::Result {
    if !configuration.has_properties() {
        return write!(f, "No configured properties.");
    }

    let rows: Vec<(&String, String)> = configuration
        .configured_properties()
        .map(|(name, value)| (name, display_value(value)))
        .collect();

    let widest = rows
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);
    let width = widest.max("Property".len()) + 2;

    writeln!(f, "Configured properties:")?;
    writeln!(f, "{}{:<width$}| Value", indent(2), "Property")?;
    write!(f, "{}{}", indent(2), "-".repeat(width + 10))?;
    for (name, value) in rows {
        write!(f, "\n{}{:<width$}| {}", indent(2), name, value)?;
    }
    Ok(())
}

fn write_targets(f: &mut fmt::Formatter<'_>, targets: &TargetTypeMapping) -> fmt::Result {
    if targets.is_empty() {
        return writeln!(
            f,
            "Based on the schema and target filters, this hook has no targets."
        );
    }

    write!(f, "This Hook is configured to target:")?;
    for (point, names) in targets.iter() {
        write!(f, "\n{INDENT}{point}:\n{}", indent(2))?;
        if names.len() <= MAX_LISTED_TARGETS {
            writeln!(f, "{}", names.join(format!("\n{}", indent(2)).as_str()))?;
        } else {
            writeln!(f, "{} resources", names.len())?;
        }
    }
    Ok(())
}

fn write_testing_status(
    f: &mut fmt::Formatter<'_>,
    status: TestingStatus,
    detail: Option<&str>,
) -> fmt::Result {
    writeln!(f, "Testing status: {status}")?;
    if let Some(warning) = status.warning(detail) {
        writeln!(f, " Warning: {warning}")?;
    }
    Ok(())
}

fn indent(level: usize) -> String {
    INDENT.repeat(level)
}

/// Whole seconds print without a fraction
fn timestamp(value: Option<DateTime<Utc>>) -> String {
    let Some(t) = value else {
        return "unknown".to_string();
    };
    if t.nanosecond() == 0 {
        t.format("%Y-%m-%d %H:%M:%S%:z").to_string()
    } else {
        t.format("%Y-%m-%d %H:%M:%S%.6f%:z").to_string()
    }
}

/// `['a', 'b']`
fn quoted_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| quote(s)).collect();
    format!("[{}]", quoted.join(", "))
}

/// Single quotes unless the text holds a `'` and no `"`
fn quote(s: &str) -> String {
    let delimiter = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(delimiter);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}

/// Top-level strings print bare; nested strings are quoted
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => nested_value(other),
    }
}

fn nested_value(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(nested_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let mut out = String::from("{");
            for (i, (k, v)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "{}: {}", quote(k), nested_value(v));
            }
            out.push('}');
            out
        }
    }
}
