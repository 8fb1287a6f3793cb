//! Removal of generator output the TypeScript layout replaces

use crate::error::{ScaffoldError, ScaffoldResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Generated entry points, root app sources, Flow config, tests and the
/// standalone Jest config, relative to the project root
///
/// `jest.config.js` has to go: Jest refuses to run when it and the
/// `package.json` `jest` section both exist.
pub const GENERATED_LEFTOVERS: &[&str] = &[
    "index.android.js",
    "index.ios.js",
    "index.js",
    "App.js",
    "App.tsx",
    "__tests__",
    ".flowconfig",
    "jest.config.js",
];

/// Delete [`GENERATED_LEFTOVERS`]; absent entries are skipped
///
/// Returns the paths actually removed.
pub async fn remove_generated(working_dir: &Path) -> ScaffoldResult<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for entry in GENERATED_LEFTOVERS {
        let path = working_dir.join(entry);
        if remove_path(&path).await? {
            debug!(path = %path.display(), "removed generated file");
            removed.push(path);
        }
    }
    Ok(removed)
}

/// Remove a file or directory tree; `false` when nothing was there
pub async fn remove_path(path: &Path) -> ScaffoldResult<bool> {
    let metadata = match fs::symlink_metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(ScaffoldError::io(path, e)),
    };

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path).await
    } else {
        fs::remove_file(path).await
    };

    match result {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(ScaffoldError::io(path, e)),
    }
}
