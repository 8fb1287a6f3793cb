//! Runtime detection, external commands and tool management
//!
//! This module provides:
//! - Node.js and package manager detection
//! - The `CommandRunner` seam used by the pipeline to run the generator and installer
//! - Installation of the React Native CLI

pub mod check;
pub mod command;
pub mod tool;

pub use check::{check_node, check_runtimes, node_version_warning, RuntimeInfo};
pub use command::{CommandOutput, CommandRunner, Invocation, SystemRunner};
pub use tool::{react_native_tool, ToolManager};
