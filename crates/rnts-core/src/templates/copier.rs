//! Template file copying with group filtering

use crate::error::{ScaffoldError, ScaffoldResult};
use crate::templates::fetcher::TemplateFetcher;
use crate::templates::manifest::{TemplateFile, TemplateManifest};
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Placeholder replaced in files marked `render: true`
pub const PROJECT_NAME_PLACEHOLDER: &str = "{{project_name}}";

/// Copy the template's selected files into the project
///
/// Returns the destination paths written, relative to `target_dir`.
pub async fn copy_template(
    fetcher: &TemplateFetcher,
    manifest: &TemplateManifest,
    target_dir: &Path,
    groups: &[&str],
    project_name: &str,
) -> ScaffoldResult<Vec<String>> {
    copy_files(
        fetcher,
        manifest.selected_files(groups),
        target_dir,
        project_name,
    )
    .await
}

/// Copy only the files of one group
pub async fn copy_group(
    fetcher: &TemplateFetcher,
    manifest: &TemplateManifest,
    target_dir: &Path,
    group: &str,
    project_name: &str,
) -> ScaffoldResult<Vec<String>> {
    copy_files(fetcher, manifest.group_files(group), target_dir, project_name).await
}

async fn copy_files<'a>(
    fetcher: &TemplateFetcher,
    files: impl Iterator<Item = &'a TemplateFile>,
    target_dir: &Path,
    project_name: &str,
) -> ScaffoldResult<Vec<String>> {
    let mut copied_files = Vec::new();

    for file in files {
        let target_path = target_dir.join(file.destination());
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ScaffoldError::io(parent, e))?;
        }

        let content = fetcher.fetch_file_bytes(&file.source).await?;
        let content = if file.render {
            render(&content, project_name)
        } else {
            content
        };

        fs::write(&target_path, &content)
            .await
            .map_err(|e| ScaffoldError::io(&target_path, e))?;
        debug!(file = %file.destination(), "copied template file");

        copied_files.push(file.destination().to_string());
    }

    Ok(copied_files)
}

fn render(content: &[u8], project_name: &str) -> Vec<u8> {
    String::from_utf8_lossy(content)
        .replace(PROJECT_NAME_PLACEHOLDER, project_name)
        .into_bytes()
}
