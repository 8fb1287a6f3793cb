//! rnts-core - scaffolds React Native projects wired for TypeScript and Jest
//!
//! A project is generated by the stock React Native generator and then
//! reworked in place: TypeScript sources and configuration are copied in, the
//! native entry points are pointed at the compiled `artifacts/` directory,
//! `package.json` gets TypeScript scripts and a Jest preset, and the generated
//! JavaScript entry files are removed.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - project record, configuration, runtime detection,
//!   command running, template copying and the text-edit engine
//! - **Layer 2: Workflow Orchestration** - [`ProjectBuilder`] runs the ordered pipeline
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use rnts_core::{Project, ProjectBuilder, ScaffoldConfig, SystemRunner};
//!
//! let project = Project::try_new("AwesomeApp", "/home/dev")?;
//! let config = ScaffoldConfig::from_env()?;
//! let runner = SystemRunner::new(config.command_timeout);
//! ProjectBuilder::new(project, config, runner).build().await?;
//! ```

pub mod builder;
pub mod cleanup;
pub mod config;
pub mod edits;
pub mod error;
pub mod project;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(test)]
mod test_support;

// Re-export main types for convenience
pub use builder::{ProjectBuilder, Step};
pub use config::{GeneratorCommand, PackageManager, ScaffoldConfig};
pub use error::{ScaffoldError, ScaffoldResult};
pub use project::Project;
pub use runtime::{check_runtimes, CommandRunner, Invocation, RuntimeInfo, SystemRunner};
pub use templates::{copy_template, TemplateFetcher, TemplateManifest, TemplateSource};

#[cfg(feature = "tui")]
pub use tui::{run, CreateArgs};
