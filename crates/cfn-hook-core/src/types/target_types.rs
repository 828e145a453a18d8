//! Hook handler and target types

use serde_json::Value;

use super::config_types::{HookAction, InvocationPoint};
use crate::error::{Error, Result};

/// Hook handler, i.e. the point at which a hook is invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerPoint {
    PreCreate,
    PreUpdate,
    PreDelete,
}

impl HandlerPoint {
    /// Resource action this handler runs for
    pub fn action(&self) -> HookAction {
        match self {
            HandlerPoint::PreCreate => HookAction::Create,
            HandlerPoint::PreUpdate => HookAction::Update,
            HandlerPoint::PreDelete => HookAction::Delete,
        }
    }

    /// Provisioning phase this handler runs in
    pub fn invocation_point(&self) -> InvocationPoint {
        InvocationPoint::PreProvision
    }
}

impl std::fmt::Display for HandlerPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandlerPoint::PreCreate => write!(f, "preCreate"),
            HandlerPoint::PreUpdate => write!(f, "preUpdate"),
            HandlerPoint::PreDelete => write!(f, "preDelete"),
        }
    }
}

impl std::str::FromStr for HandlerPoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "preCreate" => Ok(HandlerPoint::PreCreate),
            "preUpdate" => Ok(HandlerPoint::PreUpdate),
            "preDelete" => Ok(HandlerPoint::PreDelete),
            _ => Err(Error::invalid_schema(format!(
                "handler name '{}' is not one of preCreate, preUpdate, preDelete",
                s
            ))),
        }
    }
}

/// Handler declared in a hook schema, with its raw (possibly wildcard) target names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaHandler {
    pub point: HandlerPoint,
    pub target_names: Vec<String>,
}

/// Extract the handlers section of a hook schema, in declaration order
pub fn parse_schema_handlers(schema: &str) -> Result<Vec<SchemaHandler>> {
    let schema: Value = serde_json::from_str(schema)
        .map_err(|e| Error::invalid_schema(format!("schema is not valid JSON: {e}")))?;

    let Some(handlers) = schema.get("handlers") else {
        return Ok(Vec::new());
    };
    let handlers = handlers
        .as_object()
        .ok_or_else(|| Error::invalid_schema("'handlers' is not an object"))?;

    handlers
        .iter()
        .map(|(name, config)| {
            let point: HandlerPoint = name.parse()?;
            let target_names = config
                .get("targetNames")
                .and_then(Value::as_array)
                .map(|names| {
                    names
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            Ok(SchemaHandler {
                point,
                target_names,
            })
        })
        .collect()
}

/// Resource types each handler of a hook applies to, in schema order
///
/// Handlers that end up with no targets are not present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetTypeMapping {
    entries: Vec<(HandlerPoint, Vec<String>)>,
}

impl TargetTypeMapping {
    /// Record the targets of a handler; empty target lists are dropped
    pub fn push(&mut self, point: HandlerPoint, targets: Vec<String>) {
        if !targets.is_empty() {
            self.entries.push((point, targets));
        }
    }

    /// Iterate handlers and their targets
    pub fn iter(&self) -> impl Iterator<Item = (HandlerPoint, &[String])> {
        self.entries.iter().map(|(p, t)| (*p, t.as_slice()))
    }

    /// Whether no handler has any target
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Targets of a single handler
    pub fn targets(&self, point: HandlerPoint) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(p, _)| *p == point)
            .map(|(_, t)| t.as_slice())
    }
}

impl FromIterator<(HandlerPoint, Vec<String>)> for TargetTypeMapping {
    fn from_iter<I: IntoIterator<Item = (HandlerPoint, Vec<String>)>>(iter: I) -> Self {
        let mut mapping = TargetTypeMapping::default();
        for (point, targets) in iter {
            mapping.push(point, targets);
        }
        mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_schema_handlers_keeps_declaration_order() {
        let schema = r#"{
            "typeName": "Random::Type::Name",
            "handlers": {
                "preDelete": { "targetNames": ["AWS::S3::Bucket"], "permissions": [] },
                "preCreate": { "targetNames": ["AWS::S3::Bucket", "AWS::SQS::Queue"], "permissions": [] }
            }
        }"#;
        let handlers = parse_schema_handlers(schema).unwrap();
        assert_eq!(handlers.len(), 2);
        assert_eq!(handlers[0].point, HandlerPoint::PreDelete);
        assert_eq!(handlers[1].point, HandlerPoint::PreCreate);
        assert_eq!(
            handlers[1].target_names,
            vec!["AWS::S3::Bucket".to_string(), "AWS::SQS::Queue".to_string()]
        );
    }

    #[test]
    fn test_unknown_handler_is_invalid_schema() {
        let schema = r#"{"handlers": {"postDelete": {"targetNames": ["AWS::S3::Bucket"]}}}"#;
        let err = parse_schema_handlers(schema).unwrap_err();
        assert!(matches!(err, Error::InvalidSchema { .. }));
    }

    #[test]
    fn test_schema_without_handlers() {
        assert!(parse_schema_handlers(r#"{"typeName": "A::B::C"}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_malformed_schema() {
        assert!(matches!(
            parse_schema_handlers("Test Schema"),
            Err(Error::InvalidSchema { .. })
        ));
    }

    #[test]
    fn test_handler_actions() {
        assert_eq!(HandlerPoint::PreCreate.action(), HookAction::Create);
        assert_eq!(HandlerPoint::PreUpdate.action(), HookAction::Update);
        assert_eq!(HandlerPoint::PreDelete.action(), HookAction::Delete);
    }

    #[test]
    fn test_mapping_drops_empty_handlers() {
        let mapping: TargetTypeMapping = vec![
            (HandlerPoint::PreCreate, vec!["AWS::S3::Bucket".to_string()]),
            (HandlerPoint::PreDelete, vec![]),
        ]
        .into_iter()
        .collect();
        assert_eq!(mapping.iter().count(), 1);
        assert!(mapping.targets(HandlerPoint::PreDelete).is_none());
        assert_eq!(
            mapping.targets(HandlerPoint::PreCreate).unwrap(),
            &["AWS::S3::Bucket".to_string()]
        );
    }
}
