//! iOS `AppDelegate`: load the bundle from the compiled entry file

use super::{anchor_not_found, replace_anchored, ARTIFACTS_DIR};
use crate::error::{ScaffoldError, ScaffoldResult};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

const APP_DELEGATE_FILES: &[&str] = &["AppDelegate.m", "AppDelegate.mm", "AppDelegate.swift"];

/// Directories under `ios/` that never hold the app's own sources
const SKIPPED_DIRS: &[&str] = &["Pods", "build", ".git"];

/// `jsBundleURLForBundleRoot:@"index.ios"`
static OBJC_BUNDLE_ROOT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"jsBundleURLForBundleRoot:\s*@"[^"]*""#).expect("valid objc bundle regex")
});

/// `jsBundleURL(forBundleRoot: "index")`
static SWIFT_BUNDLE_ROOT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"jsBundleURL\(\s*forBundleRoot:\s*"[^"]*""#).expect("valid swift bundle regex")
});

/// Point every bundle-root lookup at `artifacts/index.ios`
pub fn point_bundle_root(text: &str) -> ScaffoldResult<String> {
    let entry = format!("{}/index.ios", ARTIFACTS_DIR);

    if OBJC_BUNDLE_ROOT_RE.is_match(text) {
        return replace_anchored(
            text,
            &OBJC_BUNDLE_ROOT_RE,
            &format!(r#"jsBundleURLForBundleRoot:@"{}""#, entry),
        );
    }
    if SWIFT_BUNDLE_ROOT_RE.is_match(text) {
        return replace_anchored(
            text,
            &SWIFT_BUNDLE_ROOT_RE,
            &format!(r#"jsBundleURL(forBundleRoot: "{}""#, entry),
        );
    }
    Err(anchor_not_found(OBJC_BUNDLE_ROOT_RE.as_str()))
}

/// Locate the app delegate, preferring `ios/<project>/AppDelegate.*`
pub fn find_app_delegate(ios_dir: &Path, project_name: &str) -> ScaffoldResult<PathBuf> {
    let app_dir = ios_dir.join(project_name);
    if let Some(path) = APP_DELEGATE_FILES
        .iter()
        .map(|file| app_dir.join(file))
        .find(|path| path.is_file())
    {
        return Ok(path);
    }

    WalkDir::new(ios_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !(entry.file_type().is_dir()
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| SKIPPED_DIRS.contains(&name)))
        })
        .filter_map(Result::ok)
        .find(|entry| {
            entry.file_type().is_file()
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| APP_DELEGATE_FILES.contains(&name))
        })
        .map(|entry| entry.into_path())
        .ok_or_else(|| ScaffoldError::FileMissing {
            path: app_dir.join(APP_DELEGATE_FILES[0]),
        })
}
