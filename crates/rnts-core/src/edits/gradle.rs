//! Android Gradle build script: point the bundler at the compiled entry file

use super::{anchor_not_found, insert_block, replace_anchored, Marker, Placement, ARTIFACTS_DIR};
use crate::error::ScaffoldResult;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

const MARKER: Marker = Marker::new("typescript-entry", "//");

/// `apply from: "../../node_modules/react-native/react.gradle"` (pre-0.71 projects)
static REACT_GRADLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)^[ \t]*apply\s+from:\s*["']\.\./\.\./node_modules/react-native/react\.gradle["']"#,
    )
    .expect("valid react.gradle regex")
});

/// A live `project.ext.react = [` map (0.60-0.70 projects), not the commented example
static EXT_REACT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*project\.ext\.react\s*=\s*\[").expect("valid ext.react regex")
});

/// An uncommented `entryFile:` entry of that map
static ENTRY_FILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^([ \t]*entryFile:\s*)["'][^"']*["']"#).expect("valid entryFile regex")
});

/// The `react { ... }` extension block of newer projects
static REACT_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^react\s*\{").expect("valid react block regex"));

/// `android/app/build.gradle`
pub fn build_gradle_path(android_dir: &Path) -> PathBuf {
    android_dir.join("app").join("build.gradle")
}

/// Make the release bundle start from `artifacts/index.android.js`
///
/// An existing `project.ext.react` map keeps its other settings (`enableHermes`
/// and friends); the entry is added to it or repointed in place.
pub fn point_entry_file(text: &str) -> ScaffoldResult<String> {
    let entry_path = format!("{}/index.android.js", ARTIFACTS_DIR);

    if EXT_REACT_RE.is_match(text) {
        if ENTRY_FILE_RE.is_match(text) {
            return replace_anchored(text, &ENTRY_FILE_RE, &format!("${{1}}\"{}\"", entry_path));
        }
        let entry = format!("entryFile: \"{}\",", entry_path);
        return insert_block(text, &EXT_REACT_RE, Placement::After, &MARKER, &[&entry]);
    }

    if REACT_GRADLE_RE.is_match(text) {
        let entry = format!("    entryFile: \"{}\"", entry_path);
        return insert_block(
            text,
            &REACT_GRADLE_RE,
            Placement::Before,
            &MARKER,
            &["project.ext.react = [", &entry, "]"],
        );
    }

    if REACT_BLOCK_RE.is_match(text) {
        // Paths in the react block are relative to android/app
        let entry = format!("entryFile = file(\"../../{}/index.android.js\")", ARTIFACTS_DIR);
        return insert_block(text, &REACT_BLOCK_RE, Placement::After, &MARKER, &[&entry]);
    }

    Err(anchor_not_found(REACT_GRADLE_RE.as_str()))
}
