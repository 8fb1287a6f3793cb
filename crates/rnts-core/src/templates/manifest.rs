//! Template manifest types and parsing

use serde::{Deserialize, Serialize};

/// A file shipped by the template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateFile {
    /// Path relative to the template directory
    pub source: String,

    /// Path inside the project (defaults to source if not specified)
    #[serde(default)]
    pub dest: Option<String>,

    /// Substitute `{{project_name}}` before writing
    #[serde(default)]
    pub render: bool,

    /// Only copied when this group is enabled
    #[serde(default)]
    pub group: Option<String>,
}

impl TemplateFile {
    /// Get the destination path (falls back to source if dest not specified)
    pub fn destination(&self) -> &str {
        self.dest.as_deref().unwrap_or(&self.source)
    }

    /// Ungrouped files are always selected
    pub fn is_selected(&self, groups: &[&str]) -> bool {
        match &self.group {
            None => true,
            Some(group) => groups.iter().any(|g| g.eq_ignore_ascii_case(group)),
        }
    }
}

/// Template manifest (templates/<name>/template.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Display name of the template
    pub name: String,

    /// Description of what the template provides
    pub description: String,

    /// Semver version for CLI compatibility checking
    pub version: String,

    /// Files to copy, in order
    pub files: Vec<TemplateFile>,
}

impl TemplateManifest {
    /// Files selected for the given groups, in manifest order
    pub fn selected_files<'a>(
        &'a self,
        groups: &'a [&'a str],
    ) -> impl Iterator<Item = &'a TemplateFile> {
        self.files.iter().filter(move |f| f.is_selected(groups))
    }

    /// Files belonging to exactly `group`
    pub fn group_files<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a TemplateFile> {
        self.files.iter().filter(move |f| {
            f.group
                .as_deref()
                .is_some_and(|g| g.eq_ignore_ascii_case(group))
        })
    }
}
