//! Anchored text edits on generated project files
//!
//! Edits are pure `&str -> String` functions so they can be tested on
//! fixtures; [`apply_to_file`] runs one against a file on disk.
//!
//! Two kinds of edit exist:
//! - marker blocks: lines wrapped in `rnts:begin <tag>` / `rnts:end <tag>`
//!   comments, inserted next to an anchor and replaced in place when present
//! - anchored replacement: a regex match rewritten where it stands

pub mod android;
pub mod gitignore;
pub mod gradle;
pub mod ios;
pub mod package_json;

use crate::error::{ScaffoldError, ScaffoldResult};
use regex::Regex;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Directory `tsc` compiles into; the native entry points load from here
pub const ARTIFACTS_DIR: &str = "artifacts";

/// Where a marker block goes relative to its anchor's line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
}

/// Comment markers delimiting an inserted block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub tag: &'static str,
    /// Line comment token of the target language
    pub comment: &'static str,
}

impl Marker {
    pub const fn new(tag: &'static str, comment: &'static str) -> Self {
        Self { tag, comment }
    }

    pub fn begin(&self) -> String {
        format!("{} rnts:begin {}", self.comment, self.tag)
    }

    pub fn end(&self) -> String {
        format!("{} rnts:end {}", self.comment, self.tag)
    }
}

/// Insert `body` as a marker block next to the first match of `anchor`
///
/// An existing block with the same marker is replaced instead, wherever it is.
pub fn insert_block(
    text: &str,
    anchor: &Regex,
    placement: Placement,
    marker: &Marker,
    body: &[&str],
) -> ScaffoldResult<String> {
    let newline = newline_style(text);

    if let Some(replaced) = replace_existing_block(text, marker, body, newline)? {
        return Ok(replaced);
    }

    let found = anchor
        .find(text)
        .ok_or_else(|| anchor_not_found(anchor.as_str()))?;

    let mut out = String::with_capacity(text.len() + 128);
    match placement {
        Placement::Before => {
            let line_start = line_start(text, found.start());
            let indent = leading_whitespace(&text[line_start..]);
            out.push_str(&text[..line_start]);
            out.push_str(&render_block(indent, marker, body, newline));
            out.push_str(&text[line_start..]);
        }
        Placement::After => {
            let line_end = line_end(text, found.end());
            let rest = &text[line_end..];
            let indent = rest
                .lines()
                .find(|l| !l.trim().is_empty())
                .map(leading_whitespace)
                .unwrap_or_else(|| leading_whitespace(&text[line_start(text, found.start())..]));
            out.push_str(&text[..line_end]);
            if !out.ends_with('\n') {
                out.push_str(newline);
            }
            out.push_str(&render_block(indent, marker, body, newline));
            out.push_str(rest);
        }
    }
    Ok(out)
}

/// Replace every match of `pattern` with `replacement` (regex `$n` expansion applies)
pub fn replace_anchored(text: &str, pattern: &Regex, replacement: &str) -> ScaffoldResult<String> {
    if !pattern.is_match(text) {
        return Err(anchor_not_found(pattern.as_str()));
    }
    Ok(pattern.replace_all(text, replacement).into_owned())
}

/// Read `path`, run `edit` on its contents and write the result back
///
/// Returns whether the file changed.
pub async fn apply_to_file<F>(path: &Path, edit: F) -> ScaffoldResult<bool>
where
    F: FnOnce(&str) -> ScaffoldResult<String>,
{
    let original = fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ScaffoldError::FileMissing {
                path: path.to_path_buf(),
            }
        } else {
            ScaffoldError::io(path, e)
        }
    })?;

    let edited = edit(&original).map_err(|e| e.in_file(path))?;
    if edited == original {
        debug!(file = %path.display(), "edit left file unchanged");
        return Ok(false);
    }

    fs::write(path, edited)
        .await
        .map_err(|e| ScaffoldError::io(path, e))?;
    debug!(file = %path.display(), "edited file");
    Ok(true)
}

pub(crate) fn anchor_not_found(anchor: &str) -> ScaffoldError {
    ScaffoldError::AnchorNotFound {
        file: PathBuf::new(),
        anchor: anchor.to_string(),
    }
}

fn replace_existing_block(
    text: &str,
    marker: &Marker,
    body: &[&str],
    newline: &str,
) -> ScaffoldResult<Option<String>> {
    let begin = marker.begin();
    let Some(begin_at) = find_marker_line(text, 0, &begin) else {
        return Ok(None);
    };
    let end = marker.end();
    let end_at = find_marker_line(text, begin_at, &end).ok_or_else(|| anchor_not_found(&end))?;

    let block_start = line_start(text, begin_at);
    let block_end = line_end(text, end_at + end.len());
    let indent = leading_whitespace(&text[block_start..]);

    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..block_start]);
    out.push_str(&render_block(indent, marker, body, newline));
    out.push_str(&text[block_end..]);
    Ok(Some(out))
}

/// Offset of `marker` at or after `from` where nothing but whitespace follows it on its line
fn find_marker_line(text: &str, from: usize, marker: &str) -> Option<usize> {
    text[from..]
        .match_indices(marker)
        .map(|(i, _)| from + i)
        .find(|&at| {
            let rest = &text[at + marker.len()..];
            rest[..rest.find('\n').unwrap_or(rest.len())].trim().is_empty()
        })
}

fn render_block(indent: &str, marker: &Marker, body: &[&str], newline: &str) -> String {
    let mut block = String::new();
    block.push_str(indent);
    block.push_str(&marker.begin());
    block.push_str(newline);
    for line in body {
        if !line.is_empty() {
            block.push_str(indent);
            block.push_str(line);
        }
        block.push_str(newline);
    }
    block.push_str(indent);
    block.push_str(&marker.end());
    block.push_str(newline);
    block
}

fn newline_style(text: &str) -> &'static str {
    if text.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// Byte offset of the start of the line containing `at`
fn line_start(text: &str, at: usize) -> usize {
    text[..at].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

/// Byte offset just past the newline ending the line containing `at`
fn line_end(text: &str, at: usize) -> usize {
    text[at..]
        .find('\n')
        .map(|i| at + i + 1)
        .unwrap_or(text.len())
}

fn leading_whitespace(line: &str) -> &str {
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}
