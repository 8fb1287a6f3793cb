//! rnts - React Native project scaffolding with TypeScript and Jest

mod logging;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use rnts_core::tui::CreateArgs;
use rnts_core::PackageManager;
use std::path::PathBuf;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "rnts")]
#[command(about = "Create a React Native project pre-wired for TypeScript and Jest")]
#[command(version)]
pub struct Args {
    /// Project name passed to `react-native init`
    pub project_name: String,

    /// Directory to create the project in (defaults to the current directory)
    pub project_dir: Option<PathBuf>,

    /// Also import VS Code tasks for building, running and testing
    ///
    /// `-vs` still works: clap reads it as `-v -s`.
    #[arg(short = 's', long = "vscode-tasks", visible_alias = "vs")]
    pub vscode_tasks: bool,

    /// Do not install the TypeScript dev packages
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Package manager used for the dev packages
    #[arg(long = "package-manager", value_enum)]
    pub package_manager: Option<PackageManagerArg>,

    /// Local directory to use for templates instead of the embedded ones (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PackageManagerArg {
    Npm,
    Yarn,
}

impl From<PackageManagerArg> for PackageManager {
    fn from(arg: PackageManagerArg) -> Self {
        match arg {
            PackageManagerArg::Npm => PackageManager::Npm,
            PackageManagerArg::Yarn => PackageManager::Yarn,
        }
    }
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            project_name: args.project_name,
            project_dir: args.project_dir,
            vscode_tasks: args.vscode_tasks,
            skip_install: args.skip_install,
            package_manager: args.package_manager.map(Into::into),
            template_dir: args.template_dir,
            yes: args.yes,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    logging::init_logging(args.verbose, args.quiet)?;
    tracing::debug!(?args, "parsed arguments");

    let result = rnts_core::run(args.into(), CLI_VERSION).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
