//! Runtime detection for Node.js and the package managers

use crate::config::PackageManager;
use anyhow::Result;
use semver::Version;
use std::process::Command;

/// Oldest Node.js the React Native CLI and `tsc` are known to work with
pub const MIN_NODE_VERSION: &str = "8.3.0";

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

fn detect_runtime(name: &'static str, program: &str) -> RuntimeInfo {
    let output = Command::new(program).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    detect_runtime("Node.js", "node")
}

/// Check if npm is available
pub fn check_npm() -> RuntimeInfo {
    detect_runtime("npm", "npm")
}

/// Check if Yarn is available
pub fn check_yarn() -> RuntimeInfo {
    detect_runtime("Yarn", "yarn")
}

/// Check Node.js plus the selected package manager; fails listing whatever is missing
pub fn check_runtimes(package_manager: PackageManager) -> Result<Vec<RuntimeInfo>> {
    let mut results = Vec::new();
    let mut missing = Vec::new();

    let node = check_node();
    if node.available {
        results.push(node);
    } else {
        missing.push("Node.js (install from https://nodejs.org)");
    }

    let manager = match package_manager {
        PackageManager::Npm => check_npm(),
        PackageManager::Yarn => check_yarn(),
    };
    if manager.available {
        results.push(manager);
    } else {
        missing.push(match package_manager {
            PackageManager::Npm => "npm (ships with Node.js from https://nodejs.org)",
            PackageManager::Yarn => "Yarn (install from https://yarnpkg.com)",
        });
    }

    if !missing.is_empty() {
        anyhow::bail!(
            "Missing required runtimes:\n{}",
            missing
                .iter()
                .map(|m| format!("  - {}", m))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    Ok(results)
}

/// Parse `node --version` output such as `v8.9.4`
pub fn parse_node_version(version_str: &str) -> Option<Version> {
    let trimmed = version_str.trim();
    let cleaned = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(cleaned).ok()
}

/// Returns a warning when the detected Node.js is older than [`MIN_NODE_VERSION`]
///
/// Unparseable versions produce no warning.
pub fn node_version_warning(version_str: &str) -> Option<String> {
    let found = parse_node_version(version_str)?;
    let minimum = Version::parse(MIN_NODE_VERSION).ok()?;

    if found < minimum {
        Some(format!(
            "Node.js {} is older than the supported minimum {}. Generation may fail.",
            found, minimum
        ))
    } else {
        None
    }
}
