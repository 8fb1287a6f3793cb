//! Version comparison for CLI and template compatibility

use semver::Version;

/// Compare CLI version against template version
/// Returns a warning message if the CLI is older than the template expects
pub fn check_compatibility(
    cli_version: &str,
    template_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let cli_ver = parse_version(cli_version)?;
    let template_ver = parse_version(template_version)?;

    if cli_ver < template_ver {
        Some(format!(
            "This template targets rnts {} or newer, but you are running {}.\n\
             Consider updating: {}",
            template_ver, cli_ver, upgrade_command
        ))
    } else {
        None
    }
}

/// Parse a version, tolerating a leading `v`
fn parse_version(version_str: &str) -> Option<Version> {
    let trimmed = version_str.trim();
    Version::parse(trimmed.strip_prefix('v').unwrap_or(trimmed)).ok()
}
