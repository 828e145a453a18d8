//! Hook project settings
//!
//! Commands that act on "this hook" take the type name from the project
//! settings file the CloudFormation CLI writes at the project root.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Settings file name at the project root
pub const PROJECT_FILE: &str = ".rpdk-config";

/// Subset of the project settings used by hook commands
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookProject {
    /// Registered type name, e.g. `MyCompany::Testing::MyTestHook`
    pub type_name: String,

    /// Artifact kind; hook projects record `HOOK`
    #[serde(default, rename = "artifact_type")]
    pub artifact_type: Option<String>,
}

impl HookProject {
    /// Load the project settings from `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        let path = Self::settings_path(dir);
        let location = path.display().to_string();
        debug!("Loading project settings from {}", location);

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::project_not_found(location));
            }
            Err(e) => return Err(Error::invalid_project(location, e.to_string())),
        };

        let project: HookProject = serde_json::from_str(&content)
            .map_err(|e| Error::invalid_project(location.clone(), e.to_string()))?;

        if project.type_name.trim().is_empty() {
            return Err(Error::invalid_project(location, "typeName is empty"));
        }
        if let Some(kind) = project.artifact_type.as_deref() {
            if kind != "HOOK" {
                return Err(Error::invalid_project(
                    location,
                    format!("artifact type is {kind}, expected HOOK"),
                ));
            }
        }

        Ok(project)
    }

    /// Path of the settings file in `dir`
    pub fn settings_path(dir: &Path) -> PathBuf {
        dir.join(PROJECT_FILE)
    }
}

/// Resolve the hook type name: explicit override first, project file second
pub fn resolve_type_name(explicit: Option<&str>, project_dir: &Path) -> Result<String> {
    match explicit {
        Some(name) if !name.trim().is_empty() => Ok(name.trim().to_string()),
        _ => HookProject::load(project_dir).map(|p| p.type_name),
    }
}
