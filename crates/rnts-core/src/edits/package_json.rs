//! `package.json` rewrites: TypeScript scripts and the Jest preset
//!
//! The manifest is edited as text so the generator's formatting and key order
//! survive; the result is re-parsed to make sure it is still valid JSON.

use super::{anchor_not_found, ARTIFACTS_DIR};
use crate::error::{ScaffoldError, ScaffoldResult};
use regex::Regex;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::LazyLock;

/// Indentation unit used by the generator
const INDENT: &str = "  ";

/// Scripts the TypeScript workflow runs, in manifest order
pub const TYPESCRIPT_SCRIPTS: &[(&str, &str)] = &[
    ("start", "react-native start"),
    ("build", "tsc"),
    ("build:watch", "tsc --watch"),
    ("clean", "rimraf artifacts"),
    ("lint", "tslint --project tsconfig.json"),
    (
        "runServer",
        "npm run clean && npm run build && concurrently -r \"npm run build:watch\" \"npm start\"",
    ),
    (
        "start:android",
        "npm run build && concurrently -r \"npm run build:watch\" \"react-native run-android\"",
    ),
    (
        "start:ios",
        "npm run build && concurrently -r \"npm run build:watch\" \"react-native run-ios\"",
    ),
    ("test", "npm run build && jest"),
];

static SCRIPTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""scripts"\s*:\s*\{[^{}]*\}"#).expect("valid scripts section regex")
});

static JEST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""jest"\s*:\s*\{[^{}]*\}"#).expect("valid jest section regex")
});

/// Jest settings: run the compiled tests in `artifacts/`
pub fn jest_config() -> Vec<(&'static str, Value)> {
    vec![
        ("preset", json!("react-native")),
        ("testRegex", json!(format!("{}/.+\\.(test|spec)\\.js$", ARTIFACTS_DIR))),
        ("moduleFileExtensions", json!(["js", "json"])),
        ("coverageDirectory", json!("coverage")),
        (
            "collectCoverageFrom",
            json!([
                format!("{}/**/*.js", ARTIFACTS_DIR),
                format!("!{}/**/__tests__/**", ARTIFACTS_DIR)
            ]),
        ),
    ]
}

/// Replace the `scripts` section with [`TYPESCRIPT_SCRIPTS`]
pub fn rewrite_scripts(text: &str) -> ScaffoldResult<String> {
    let members: Vec<(&str, Value)> = TYPESCRIPT_SCRIPTS
        .iter()
        .map(|(name, command)| (*name, json!(command)))
        .collect();
    let out = replace_or_insert_section(
        text,
        "scripts",
        &members,
        &SCRIPTS_RE,
        Insertion::First,
    )?;
    validate(&out)?;
    Ok(out)
}

/// Replace the `jest` section with [`jest_config`]
pub fn rewrite_jest(text: &str) -> ScaffoldResult<String> {
    let out = replace_or_insert_section(
        text,
        "jest",
        &jest_config(),
        &JEST_RE,
        Insertion::Last,
    )?;
    validate(&out)?;
    Ok(out)
}

/// Where a missing section is added in the root object
#[derive(Debug, Clone, Copy)]
enum Insertion {
    First,
    Last,
}

fn replace_or_insert_section(
    text: &str,
    key: &str,
    members: &[(&str, Value)],
    section_re: &Regex,
    insertion: Insertion,
) -> ScaffoldResult<String> {
    // Only a root-level member counts; `devDependencies.jest` does not
    let manifest = parse(text)?;
    let Some(current) = manifest.get(key) else {
        return insert_section(text, key, members, insertion);
    };

    // A nested or non-object section is left for the user
    let found = section_re
        .find_iter(text)
        .find(|m| {
            let section = m.as_str();
            section
                .find('{')
                .and_then(|open| serde_json::from_str::<Value>(&section[open..]).ok())
                .is_some_and(|value| &value == current)
        })
        .ok_or_else(|| anchor_not_found(section_re.as_str()))?;

    let line_start = text[..found.start()].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let indent = &text[line_start..found.start()];
    let indent = if indent.trim().is_empty() { indent } else { INDENT };
    let section = render_section(key, members, indent);
    Ok(format!(
        "{}{}{}",
        &text[..found.start()],
        section,
        &text[found.end()..]
    ))
}

fn insert_section(
    text: &str,
    key: &str,
    members: &[(&str, Value)],
    insertion: Insertion,
) -> ScaffoldResult<String> {
    let section = render_section(key, members, INDENT);
    match insertion {
        Insertion::First => {
            let open = text.find('{').ok_or_else(|| anchor_not_found("{"))?;
            let rest = &text[open + 1..];
            let separator = if rest.trim_start().starts_with('}') { "" } else { "," };
            Ok(format!(
                "{}\n{}{}{}{}",
                &text[..=open],
                INDENT,
                section,
                separator,
                rest
            ))
        }
        Insertion::Last => {
            let close = text.rfind('}').ok_or_else(|| anchor_not_found("}"))?;
            let head = text[..close].trim_end();
            let separator = if head.ends_with('{') { "" } else { "," };
            Ok(format!(
                "{}{}\n{}{}\n{}",
                head,
                separator,
                INDENT,
                section,
                &text[close..]
            ))
        }
    }
}

/// `"key": { ... }` with members one indent deeper than `indent`
fn render_section(key: &str, members: &[(&str, Value)], indent: &str) -> String {
    let body: Vec<String> = members
        .iter()
        .map(|(name, value)| format!("{}{}{}: {}", indent, INDENT, json!(name), value))
        .collect();
    format!("{}: {{\n{}\n{}}}", json!(key), body.join(",\n"), indent)
}

fn parse(text: &str) -> ScaffoldResult<Value> {
    serde_json::from_str::<Value>(text).map_err(|source| ScaffoldError::InvalidManifest {
        path: PathBuf::new(),
        source,
    })
}

fn validate(text: &str) -> ScaffoldResult<()> {
    parse(text).map(|_| ())
}
