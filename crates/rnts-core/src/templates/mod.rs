//! Template files layered on top of the generated project
//!
//! This module provides:
//! - The template manifest (`template.yaml`) types
//! - Retrieval from the embedded set or a local directory
//! - Copying with group filtering and name substitution
//! - Version compatibility checking for local templates

pub mod copier;
pub mod fetcher;
pub mod manifest;
pub mod version;

pub use copier::{copy_group, copy_template};
pub use fetcher::{TemplateFetcher, TemplateSource};
pub use manifest::{TemplateFile, TemplateManifest};
pub use version::check_compatibility;

/// Group holding the editor task definitions
pub const VSCODE_GROUP: &str = "vscode";
