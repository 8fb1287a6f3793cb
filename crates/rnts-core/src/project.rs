//! The project record carried through the pipeline

use crate::error::{ScaffoldError, ScaffoldResult};
use regex::Regex;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

/// Names `react-native init` accepts
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("valid name regex"));

/// A React Native project to be generated
///
/// All three fields are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    name: String,
    parent: PathBuf,
    working_dir: PathBuf,
}

impl Project {
    /// Create a project named `name` inside `parent`
    pub fn new(name: impl Into<String>, parent: impl Into<PathBuf>) -> Self {
        let name = name.into();
        let parent = parent.into();
        let working_dir = normalize(&parent.join(&name));
        Self {
            name,
            parent,
            working_dir,
        }
    }

    /// Validate and create in one go
    pub fn try_new(name: impl Into<String>, parent: impl Into<PathBuf>) -> ScaffoldResult<Self> {
        let name = name.into();
        Self::validate_name(&name)?;
        Ok(Self::new(name, parent))
    }

    /// Check that the generator will accept this project name
    pub fn validate_name(name: &str) -> ScaffoldResult<()> {
        let invalid = |reason: &str| ScaffoldError::InvalidProjectName {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if !NAME_RE.is_match(name) {
            return Err(invalid(
                "use only letters, digits, '_' or '$', and do not start with a digit",
            ));
        }
        if name.eq_ignore_ascii_case("react") {
            return Err(invalid("'React' is reserved by React Native"));
        }
        Ok(())
    }

    /// Fail if the project cannot be generated at its location
    pub fn ensure_vacant(&self) -> ScaffoldResult<()> {
        if !self.parent.is_dir() {
            return Err(ScaffoldError::ParentMissing {
                path: self.parent.clone(),
            });
        }
        if self.working_dir.exists() {
            return Err(ScaffoldError::ProjectExists {
                path: self.working_dir.clone(),
            });
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> &Path {
        &self.parent
    }

    /// Parent directory joined with the project name
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn android_dir(&self) -> PathBuf {
        self.working_dir.join("android")
    }

    pub fn ios_dir(&self) -> PathBuf {
        self.working_dir.join("ios")
    }

    /// The generated `package.json`
    pub fn manifest_path(&self) -> PathBuf {
        self.working_dir.join("package.json")
    }
}

/// Lexically resolve `.` and `..` without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
