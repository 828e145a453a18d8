//! Type definitions for hook configuration, versions and targets

mod config_types;
mod target_types;
mod version_types;

pub use config_types::*;
pub use target_types::*;
pub use version_types::*;
