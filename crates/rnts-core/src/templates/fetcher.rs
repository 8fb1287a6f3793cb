//! Template retrieval from the embedded set or a local directory
//!
//! The embedded set is compiled in from `templates/react-native-typescript`.
//! A local directory with the same layout (a `template.yaml` next to the files
//! it lists) can replace it at run time.

use super::manifest::TemplateManifest;
use crate::error::{ScaffoldError, ScaffoldResult};
use std::path::PathBuf;
use tokio::fs;

macro_rules! embedded {
    ($path:literal) => {
        (
            $path,
            include_bytes!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/../../templates/react-native-typescript/",
                $path
            ))
            .as_slice(),
        )
    };
}

/// Files compiled into the binary, keyed by path relative to the template root
const EMBEDDED_FILES: &[(&str, &[u8])] = &[
    embedded!("template.yaml"),
    embedded!("tsconfig.json"),
    embedded!("tslint.json"),
    embedded!("src/App.tsx"),
    embedded!("src/index.android.tsx"),
    embedded!("src/index.ios.tsx"),
    embedded!("src/__tests__/App.test.tsx"),
    embedded!("vscode/tasks.json"),
];

const MANIFEST_FILE: &str = "template.yaml";

/// Template source - either compiled in or a local directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Embedded,
    Local(PathBuf),
}

impl TemplateSource {
    /// Local directory when given, embedded otherwise
    pub fn from_option(dir: Option<PathBuf>) -> Self {
        dir.map(Self::Local).unwrap_or(Self::Embedded)
    }
}

/// Reads template manifests and files from a [`TemplateSource`]
#[derive(Debug, Clone)]
pub struct TemplateFetcher {
    source: TemplateSource,
}

impl TemplateFetcher {
    pub fn new(source: TemplateSource) -> Self {
        Self { source }
    }

    pub fn embedded() -> Self {
        Self::new(TemplateSource::Embedded)
    }

    /// Create a fetcher for local templates
    pub fn from_local(path: PathBuf) -> Self {
        Self::new(TemplateSource::Local(path))
    }

    /// Fetch and parse `template.yaml`
    pub async fn fetch_manifest(&self) -> ScaffoldResult<TemplateManifest> {
        let bytes = self.fetch_file_bytes(MANIFEST_FILE).await?;
        let content = String::from_utf8_lossy(&bytes);
        serde_yaml::from_str(&content)
            .map_err(|e| ScaffoldError::Template(format!("Failed to parse {}: {}", MANIFEST_FILE, e)))
    }

    /// Fetch a file as bytes
    pub async fn fetch_file_bytes(&self, file_path: &str) -> ScaffoldResult<Vec<u8>> {
        match &self.source {
            TemplateSource::Embedded => EMBEDDED_FILES
                .iter()
                .find(|(path, _)| *path == file_path)
                .map(|(_, bytes)| bytes.to_vec())
                .ok_or_else(|| {
                    ScaffoldError::Template(format!(
                        "File '{}' is not part of the embedded template",
                        file_path
                    ))
                }),
            TemplateSource::Local(dir) => {
                let full_path = dir.join(file_path);
                fs::read(&full_path).await.map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        ScaffoldError::FileMissing { path: full_path }
                    } else {
                        ScaffoldError::io(full_path, e)
                    }
                })
            }
        }
    }
}
