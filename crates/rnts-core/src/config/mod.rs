//! Scaffolding configuration
//!
//! Defaults are overridden by `RNTS_*` environment variables, then by CLI flags.

pub mod generator;

use crate::error::{ScaffoldError, ScaffoldResult};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub use generator::{detect_generator, GeneratorCommand};

/// Environment variable overriding the generator command line
pub const GENERATOR_ENV: &str = "RNTS_GENERATOR";
/// Environment variable selecting the package manager
pub const PACKAGE_MANAGER_ENV: &str = "RNTS_PACKAGE_MANAGER";
/// Environment variable pointing at a local template directory
pub const TEMPLATE_DIR_ENV: &str = "RNTS_TEMPLATE_DIR";
/// Environment variable for the subprocess timeout, in seconds
pub const COMMAND_TIMEOUT_ENV: &str = "RNTS_COMMAND_TIMEOUT";

/// Default subprocess timeout. `react-native init` downloads a lot.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(600);

/// Development packages the TypeScript toolchain needs
pub const TYPESCRIPT_DEV_PACKAGES: &[&str] = &[
    "typescript",
    "tslint",
    "rimraf",
    "concurrently",
    "@types/react@latest",
    "@types/react-native@latest",
    "@types/jest@latest",
    "@types/react-test-renderer@latest",
];

/// Package manager used to install the TypeScript toolchain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
}

impl PackageManager {
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
        }
    }

    /// Arguments that add `packages` as development dependencies
    pub fn dev_install_args(&self, packages: &[&str]) -> Vec<String> {
        let mut args: Vec<String> = match self {
            PackageManager::Npm => vec!["install".into(), "--save-dev".into()],
            PackageManager::Yarn => vec!["add".into(), "--dev".into()],
        };
        args.extend(packages.iter().map(|p| p.to_string()));
        args
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program())
    }
}

impl FromStr for PackageManager {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "npm" => Ok(PackageManager::Npm),
            "yarn" => Ok(PackageManager::Yarn),
            other => Err(ScaffoldError::Config {
                key: PACKAGE_MANAGER_ENV.to_string(),
                reason: format!("unknown package manager '{}' (expected npm or yarn)", other),
            }),
        }
    }
}

/// Tunables for one scaffolding run
#[derive(Debug, Clone)]
pub struct ScaffoldConfig {
    /// Explicit generator; detected at run time when `None`
    pub generator: Option<GeneratorCommand>,
    pub package_manager: PackageManager,
    /// Local template directory; embedded templates when `None`
    pub template_dir: Option<PathBuf>,
    pub command_timeout: Duration,
    pub skip_install: bool,
    pub vscode_tasks: bool,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            generator: None,
            package_manager: PackageManager::default(),
            template_dir: None,
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
            skip_install: false,
            vscode_tasks: false,
        }
    }
}

impl ScaffoldConfig {
    /// Defaults overridden by the process environment
    pub fn from_env() -> ScaffoldResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the `RNTS_*` keys
    pub fn from_lookup<F>(lookup: F) -> ScaffoldResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(raw) = value(GENERATOR_ENV) {
            config.generator = Some(GeneratorCommand::parse(&raw).ok_or_else(|| {
                ScaffoldError::Config {
                    key: GENERATOR_ENV.to_string(),
                    reason: "empty command".to_string(),
                }
            })?);
        }

        if let Some(raw) = value(PACKAGE_MANAGER_ENV) {
            config.package_manager = raw.parse()?;
        }

        if let Some(raw) = value(TEMPLATE_DIR_ENV) {
            config.template_dir = Some(PathBuf::from(raw));
        }

        if let Some(raw) = value(COMMAND_TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| ScaffoldError::Config {
                key: COMMAND_TIMEOUT_ENV.to_string(),
                reason: format!("'{}' is not a number of seconds", raw),
            })?;
            config.command_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
