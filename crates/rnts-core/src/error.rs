//! Error types for the scaffolding pipeline

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result alias used throughout the library
pub type ScaffoldResult<T> = Result<T, ScaffoldError>;

/// Everything that can stop the pipeline
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Parent directory does not exist: {}", path.display())]
    ParentMissing { path: PathBuf },

    #[error(
        "Project already exists at {}. Remove it or choose another name.",
        path.display()
    )]
    ProjectExists { path: PathBuf },

    #[error("Invalid configuration for {key}: {reason}")]
    Config { key: String, reason: String },

    #[error("Failed to start `{command}`: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with status {code}\n{stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("`{command}` timed out after {} seconds", timeout.as_secs())]
    CommandTimedOut { command: String, timeout: Duration },

    #[error("Generator finished but {} was not created", path.display())]
    GeneratorProducedNothing { path: PathBuf },

    #[error("Expected file not found: {}", path.display())]
    FileMissing { path: PathBuf },

    #[error("Could not find `{anchor}` in {}", file.display())]
    AnchorNotFound { file: PathBuf, anchor: String },

    #[error("{} is not valid JSON after rewriting: {source}", path.display())]
    InvalidManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Template error: {0}")]
    Template(String),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScaffoldError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScaffoldError::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach the file path to an edit failure raised by a pure text edit
    pub(crate) fn in_file(self, file: &std::path::Path) -> Self {
        match self {
            ScaffoldError::AnchorNotFound { anchor, .. } => ScaffoldError::AnchorNotFound {
                file: file.to_path_buf(),
                anchor,
            },
            ScaffoldError::InvalidManifest { source, .. } => ScaffoldError::InvalidManifest {
                path: file.to_path_buf(),
                source,
            },
            other => other,
        }
    }
}
