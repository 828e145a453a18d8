//! Target resolution for `describe`
//!
//! A hook schema declares target names that may contain shell-style wildcards
//! (`AWS::S3::*`). Those are expanded against the resource types known to the
//! registry, then narrowed by the configured target filters.

use std::collections::BTreeSet;

use globset::{Glob, GlobMatcher};
use tracing::debug;

use crate::types::{
    HandlerPoint, HookAction, InvocationPoint, SchemaHandler, TargetFilters, TargetTypeMapping,
};

/// Whether a type name pattern contains glob metacharacters
pub fn contains_wildcard(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Glob match of a resource type name against a pattern
///
/// Invalid patterns fall back to literal comparison.
pub fn matches_pattern(name: &str, pattern: &str) -> bool {
    if !contains_wildcard(pattern) {
        return name == pattern;
    }
    compile(pattern).is_some_and(|m| m.is_match(name))
}

fn compile(pattern: &str) -> Option<GlobMatcher> {
    match Glob::new(pattern) {
        Ok(glob) => Some(glob.compile_matcher()),
        Err(e) => {
            debug!("Ignoring invalid target pattern {}: {}", pattern, e);
            None
        }
    }
}

/// Expand wildcard patterns against the known resource type names
///
/// Literal names are kept as-is even when the registry does not list them.
/// The result is sorted and free of duplicates.
pub fn resolve_type_names(patterns: &[String], known_types: &[String]) -> Vec<String> {
    let mut resolved = BTreeSet::new();
    for pattern in patterns {
        if contains_wildcard(pattern) {
            if let Some(matcher) = compile(pattern) {
                let matching = known_types.iter().filter(|t| matcher.is_match(t.as_str()));
                resolved.extend(matching.cloned());
            }
        } else {
            resolved.insert(pattern.clone());
        }
    }
    resolved.into_iter().collect()
}

/// One concrete (target, action, invocation point) the hook could run for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetHandler<'a> {
    pub target_name: &'a str,
    pub action: HookAction,
    pub invocation_point: InvocationPoint,
}

/// Whether a target handler passes the configured target filters
///
/// Explicit `Targets` triples take precedence over the name / action /
/// invocation point lists; absent lists match everything.
pub fn matches_filters(handler: &TargetHandler<'_>, filters: &TargetFilters) -> bool {
    if let Some(targets) = &filters.targets {
        return targets.iter().any(|t| {
            matches_pattern(handler.target_name, &t.target_name)
                && t.action == handler.action
                && t.invocation_point == handler.invocation_point
        });
    }

    let name_matches = filters.target_names.as_ref().is_none_or(|names| {
        names
            .iter()
            .any(|pattern| matches_pattern(handler.target_name, pattern))
    });
    let action_matches = filters
        .actions
        .as_ref()
        .is_none_or(|actions| actions.contains(&handler.action));
    let invocation_point_matches = filters
        .invocation_points
        .as_ref()
        .is_none_or(|points| points.contains(&handler.invocation_point));

    name_matches && action_matches && invocation_point_matches
}

/// Build the target mapping of a hook from its schema handlers
///
/// `known_types` is only consulted for wildcard patterns.
pub fn build_target_mapping(
    handlers: &[SchemaHandler],
    filters: Option<&TargetFilters>,
    known_types: &[String],
) -> TargetTypeMapping {
    handlers
        .iter()
        .map(|handler| {
            let targets = resolve_type_names(&handler.target_names, known_types);
            let targets = match filters {
                Some(filters) => targets
                    .into_iter()
                    .filter(|name| matches_filters(&target_handler(handler.point, name), filters))
                    .collect(),
                None => targets,
            };
            (handler.point, targets)
        })
        .collect()
}

fn target_handler(point: HandlerPoint, name: &str) -> TargetHandler<'_> {
    TargetHandler {
        target_name: name,
        action: point.action(),
        invocation_point: point.invocation_point(),
    }
}

/// Whether any handler of the schema uses a wildcard target name
pub fn needs_type_listing(handlers: &[SchemaHandler]) -> bool {
    handlers
        .iter()
        .flat_map(|h| h.target_names.iter())
        .any(|name| contains_wildcard(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TargetFilter;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn handler(name: &str, action: HookAction) -> TargetHandler<'_> {
        TargetHandler {
            target_name: name,
            action,
            invocation_point: InvocationPoint::PreProvision,
        }
    }

    fn matches(name: &str, action: HookAction, filters: &TargetFilters) -> bool {
        matches_filters(&handler(name, action), filters)
    }

    fn explicit_targets() -> TargetFilters {
        TargetFilters {
            targets: Some(vec![
                TargetFilter {
                    target_name: "AWS::S3::Bucket".to_string(),
                    action: HookAction::Create,
                    invocation_point: InvocationPoint::PreProvision,
                },
                TargetFilter {
                    target_name: "AWS::SNS::Topic".to_string(),
                    action: HookAction::Update,
                    invocation_point: InvocationPoint::PreProvision,
                },
                TargetFilter {
                    target_name: "AWS::*::Table".to_string(),
                    action: HookAction::Create,
                    invocation_point: InvocationPoint::PreProvision,
                },
            ]),
            ..Default::default()
        }
    }

    #[test]
    fn test_explicit_targets_require_all_three_to_match() {
        let filters = explicit_targets();
        assert!(matches("AWS::S3::Bucket", HookAction::Create, &filters));
        assert!(!matches("AWS::S3::Bucket", HookAction::Update, &filters));
        assert!(matches("AWS::SNS::Topic", HookAction::Update, &filters));
        assert!(!matches("AWS::SQS::Queue", HookAction::Create, &filters));
    }

    #[test]
    fn test_explicit_targets_with_wildcard() {
        let filters = explicit_targets();
        assert!(matches("AWS::DynamoDB::Table", HookAction::Create, &filters));
        assert!(!matches("AWS::DynamoDB::Table", HookAction::Delete, &filters));
    }

    #[test]
    fn test_target_names_with_wildcards() {
        let filters = TargetFilters {
            target_names: Some(strings(&["AWS::*Formation::Stack", "AWS::CloudWatch::Alar?"])),
            ..Default::default()
        };
        assert!(matches("AWS::CloudFormation::Stack", HookAction::Delete, &filters));
        assert!(matches("AWS::CloudWatch::Alarm", HookAction::Create, &filters));
        assert!(!matches("AWS::CloudWatch::Dashboard", HookAction::Create, &filters));
    }

    #[test]
    fn test_names_and_actions_combine() {
        let filters = TargetFilters {
            target_names: Some(strings(&["AWS::Logs::LogStream", "AWS::LakeFormation::Tag"])),
            actions: Some(vec![HookAction::Delete]),
            ..Default::default()
        };
        assert!(matches("AWS::Logs::LogStream", HookAction::Delete, &filters));
        assert!(!matches("AWS::Logs::LogStream", HookAction::Create, &filters));
        assert!(!matches("AWS::S3::Bucket", HookAction::Delete, &filters));
    }

    #[test]
    fn test_actions_and_invocation_points_only() {
        let filters = TargetFilters {
            actions: Some(vec![HookAction::Update]),
            invocation_points: Some(vec![InvocationPoint::PreProvision]),
            ..Default::default()
        };
        assert!(matches("AWS::Glue::Connection", HookAction::Update, &filters));
        assert!(!matches("AWS::Glue::Connection", HookAction::Create, &filters));
    }

    #[test]
    fn test_empty_filters_match_everything() {
        assert!(matches_filters(
            &handler("AWS::EC2::Instance", HookAction::Create),
            &TargetFilters::default()
        ));
    }

    #[test]
    fn test_resolve_type_names_expands_and_sorts() {
        let known = strings(&[
            "AWS::S3::Bucket",
            "AWS::DynamoDB::Table",
            "AWS::DynamoDB::GlobalTable",
            "AWS::SQS::Queue",
        ]);
        let patterns = strings(&["AWS::S3::Bucket", "AWS::DynamoDB::*"]);
        let resolved = resolve_type_names(&patterns, &known);
        assert_eq!(
            resolved,
            strings(&[
                "AWS::DynamoDB::GlobalTable",
                "AWS::DynamoDB::Table",
                "AWS::S3::Bucket",
            ])
        );
    }

    #[test]
    fn test_resolve_keeps_unknown_literals() {
        let resolved = resolve_type_names(&strings(&["MyCompany::Custom::Thing"]), &[]);
        assert_eq!(resolved, strings(&["MyCompany::Custom::Thing"]));
    }

    #[test]
    fn test_build_target_mapping_with_filters() {
        let handlers = vec![
            SchemaHandler {
                point: HandlerPoint::PreDelete,
                target_names: strings(&["AWS::S3::Bucket", "AWS::DynamoDB::*"]),
            },
            SchemaHandler {
                point: HandlerPoint::PreCreate,
                target_names: strings(&["AWS::S3::Bucket", "AWS::DynamoDB::*"]),
            },
            SchemaHandler {
                point: HandlerPoint::PreUpdate,
                target_names: strings(&["AWS::DynamoDB::*"]),
            },
        ];
        let filters = TargetFilters {
            targets: Some(vec![
                TargetFilter {
                    target_name: "AWS::S3::Bucket".to_string(),
                    action: HookAction::Create,
                    invocation_point: InvocationPoint::PreProvision,
                },
                TargetFilter {
                    target_name: "AWS::DynamoDB::Table".to_string(),
                    action: HookAction::Create,
                    invocation_point: InvocationPoint::PreProvision,
                },
                TargetFilter {
                    target_name: "AWS::DynamoDB::Table".to_string(),
                    action: HookAction::Update,
                    invocation_point: InvocationPoint::PreProvision,
                },
            ]),
            ..Default::default()
        };
        let known = strings(&[
            "AWS::DynamoDB::GlobalTable",
            "AWS::DynamoDB::Table",
            "AWS::S3::Bucket",
        ]);

        let mapping = build_target_mapping(&handlers, Some(&filters), &known);

        assert!(mapping.targets(HandlerPoint::PreDelete).is_none());
        assert_eq!(
            mapping.targets(HandlerPoint::PreCreate).unwrap(),
            strings(&["AWS::DynamoDB::Table", "AWS::S3::Bucket"]).as_slice()
        );
        assert_eq!(
            mapping.targets(HandlerPoint::PreUpdate).unwrap(),
            strings(&["AWS::DynamoDB::Table"]).as_slice()
        );
    }

    #[test]
    fn test_needs_type_listing() {
        let literal = vec![SchemaHandler {
            point: HandlerPoint::PreCreate,
            target_names: strings(&["AWS::S3::Bucket"]),
        }];
        let wildcard = vec![SchemaHandler {
            point: HandlerPoint::PreCreate,
            target_names: strings(&["AWS::S3::*"]),
        }];
        assert!(!needs_type_listing(&literal));
        assert!(needs_type_listing(&wildcard));
    }
}
