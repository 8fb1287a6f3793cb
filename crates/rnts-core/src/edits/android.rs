//! Android `MainApplication`: load the compiled JS entry module

use super::{anchor_not_found, insert_block, replace_anchored, Marker, Placement, ARTIFACTS_DIR};
use crate::error::{ScaffoldError, ScaffoldResult};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

const MARKER: Marker = Marker::new("typescript-entry", "//");

const MAIN_APPLICATION_FILES: &[&str] = &["MainApplication.java", "MainApplication.kt"];

/// `protected String getJSMainModuleName() { return "index"; }`
static JAVA_MODULE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(getJSMainModuleName\(\)\s*\{\s*return\s+)"[^"]*""#)
        .expect("valid java module regex")
});

/// `override fun getJSMainModuleName(): String = "index"`
static KOTLIN_MODULE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(getJSMainModuleName\(\)\s*:\s*String\s*=\s*)"[^"]*""#)
        .expect("valid kotlin module regex")
});

static HOST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"new\s+ReactNativeHost\s*\(\s*this\s*\)\s*\{").expect("valid host regex")
});

fn main_module() -> String {
    format!("{}/index.android", ARTIFACTS_DIR)
}

/// Make the React Native host load `artifacts/index.android`
pub fn point_main_module(text: &str) -> ScaffoldResult<String> {
    let replacement = format!(r#"${{1}}"{}""#, main_module());

    for existing in [&*JAVA_MODULE_RE, &*KOTLIN_MODULE_RE] {
        if existing.is_match(text) {
            return replace_anchored(text, existing, &replacement);
        }
    }

    if !HOST_RE.is_match(text) {
        return Err(anchor_not_found(HOST_RE.as_str()));
    }

    let body_return = format!("  return \"{}\";", main_module());
    insert_block(
        text,
        &HOST_RE,
        Placement::After,
        &MARKER,
        &[
            "@Override",
            "protected String getJSMainModuleName() {",
            &body_return,
            "}",
            "",
        ],
    )
}

/// Locate the generated `MainApplication` source under `android/app/src/main/java`
pub fn find_main_application(android_dir: &Path) -> ScaffoldResult<PathBuf> {
    let java_root = android_dir.join("app").join("src").join("main").join("java");

    WalkDir::new(&java_root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .find(|entry| {
            entry.file_type().is_file()
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| MAIN_APPLICATION_FILES.contains(&name))
        })
        .map(|entry| entry.into_path())
        .ok_or_else(|| ScaffoldError::FileMissing {
            path: java_root.join(MAIN_APPLICATION_FILES[0]),
        })
}
