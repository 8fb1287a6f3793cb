//! Keep compiler output out of version control

use super::ARTIFACTS_DIR;
use crate::error::{ScaffoldError, ScaffoldResult};
use std::path::Path;
use tokio::fs;

/// Append an `artifacts/` entry unless one is already there
pub fn ignore_artifacts(text: &str) -> String {
    let already = text.lines().map(str::trim).any(|line| {
        let entry = line.trim_start_matches('/').trim_end_matches('/');
        entry == ARTIFACTS_DIR
    });
    if already {
        return text.to_string();
    }

    let mut out = text.to_string();
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str("# TypeScript output\n");
    out.push_str(ARTIFACTS_DIR);
    out.push_str("/\n");
    out
}

/// Update `<working_dir>/.gitignore`, creating it when the generator did not
pub async fn update(working_dir: &Path) -> ScaffoldResult<()> {
    let path = working_dir.join(".gitignore");
    let current = match fs::read_to_string(&path).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(ScaffoldError::io(path, e)),
    };

    let updated = ignore_artifacts(&current);
    if updated != current {
        fs::write(&path, updated)
            .await
            .map_err(|e| ScaffoldError::io(&path, e))?;
    }
    Ok(())
}
