//! # cfn-hook-core
//!
//! Core library for the cfn-hook CLI providing:
//! - Hook type configuration documents (read and written as JSON)
//! - Version, testing status and schema handler types
//! - Target resolution against schema wildcards and target filters
//! - The text report printed by `describe`

pub mod arn;
pub mod error;
pub mod project;
pub mod render;
pub mod targets;
pub mod types;

pub use error::{Error, Result};
pub use render::DescribeBundle;
