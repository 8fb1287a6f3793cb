//! Charm-style CLI prompts using cliclack

use crate::builder::ProjectBuilder;
use crate::config::generator::find_generator;
use crate::config::{GeneratorCommand, PackageManager, ScaffoldConfig};
use crate::project::Project;
use crate::runtime::check;
use crate::runtime::command::SystemRunner;
use crate::runtime::tool::{react_native_tool, ToolManager};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Name handed to `react-native init`
    pub project_name: String,

    /// Directory the project is created in; current directory when unset
    pub project_dir: Option<PathBuf>,

    /// Also import the VS Code tasks
    pub vscode_tasks: bool,

    /// Do not install the TypeScript dev packages
    pub skip_install: bool,

    /// Overrides `RNTS_PACKAGE_MANAGER`
    pub package_manager: Option<PackageManager>,

    /// Local directory to use for templates instead of the embedded ones
    pub template_dir: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the CLI with interactive prompts
pub async fn run(args: CreateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro("React Native + TypeScript")?;

    // Step 1: Resolve configuration and the project location
    let mut config = resolve_config(&args, ScaffoldConfig::from_env()?);
    let project = resolve_project(&args)?;

    // Step 2: Check runtimes
    check_runtimes(config.package_manager)?;

    // Step 3: Make sure a generator is around
    if config.generator.is_none() {
        config.generator = Some(resolve_generator(&args, config.package_manager).await?);
    }

    if let Some(dir) = &config.template_dir {
        cliclack::log::info(format!("Using local templates from {}", dir.display()))?;
    }

    let runner = SystemRunner::new(config.command_timeout);
    let builder = ProjectBuilder::new(project, config, runner);

    // Check version compatibility
    if let Some(warning) = builder.compatibility_warning(cli_version).await? {
        cliclack::log::warning(format!(
            "Version warning: {}",
            warning.lines().next().unwrap_or(&warning)
        ))?;
    }

    // Step 4: Build, one spinner per step
    for step in builder.plan() {
        let spinner = cliclack::spinner();
        spinner.start(step.label());
        match builder.run_step(step).await {
            Ok(()) => spinner.stop(step.done()),
            Err(e) => {
                spinner.error(step.label());
                return Err(e.into());
            }
        }
    }

    // Step 5: Show next steps
    print_next_steps(builder.project(), builder.config())?;

    Ok(())
}

/// Layer CLI flags over the environment-derived configuration
fn resolve_config(args: &CreateArgs, mut config: ScaffoldConfig) -> ScaffoldConfig {
    if let Some(manager) = args.package_manager {
        config.package_manager = manager;
    }
    if args.template_dir.is_some() {
        config.template_dir = args.template_dir.clone();
    }
    config.skip_install = args.skip_install;
    config.vscode_tasks = args.vscode_tasks;
    config
}

/// Absolute parent directory for the project
fn resolve_parent(project_dir: Option<&Path>, current_dir: &Path) -> PathBuf {
    match project_dir {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => current_dir.join(dir),
        None => current_dir.to_path_buf(),
    }
}

fn resolve_project(args: &CreateArgs) -> Result<Project> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let parent = resolve_parent(args.project_dir.as_deref(), &current_dir);

    let project = Project::try_new(args.project_name.clone(), parent)?;
    project.ensure_vacant()?;

    cliclack::log::info(format!(
        "Creating {} in {}",
        project.name(),
        project.working_dir().display()
    ))?;
    Ok(project)
}

fn check_runtimes(package_manager: PackageManager) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking runtimes...");

    match check::check_runtimes(package_manager) {
        Ok(runtimes) => {
            let runtime_info: Vec<String> = runtimes
                .iter()
                .map(|r| format!("{} ({})", r.name, r.version.as_deref().unwrap_or("unknown")))
                .collect();
            spinner.stop(format!("Detected runtimes: {}", runtime_info.join(", ")));

            let node_version = runtimes
                .iter()
                .find(|r| r.name == "Node.js")
                .and_then(|r| r.version.as_deref());
            if let Some(warning) = node_version.and_then(check::node_version_warning) {
                cliclack::log::warning(warning)?;
            }
            Ok(())
        }
        Err(e) => {
            spinner.stop("Missing runtimes");
            cliclack::log::error(format!("{}", e))?;
            anyhow::bail!("Please install the missing runtimes and try again.");
        }
    }
}

async fn resolve_generator(
    args: &CreateArgs,
    package_manager: PackageManager,
) -> Result<GeneratorCommand> {
    let tool = react_native_tool(package_manager);

    if let Some(generator) = find_generator() {
        let version = (generator.program == tool.config().name)
            .then(|| tool.get_version())
            .flatten();
        match version {
            Some(version) => cliclack::log::success(format!(
                "Using generator: {} ({})",
                generator, version
            ))?,
            None => cliclack::log::success(format!("Using generator: {}", generator))?,
        }
        return Ok(generator);
    }

    let installed = GeneratorCommand::new(tool.config().name, &[]);
    let npx = GeneratorCommand::new("npx", &[tool.config().name]);

    cliclack::log::warning(format!("{} is not installed", tool.config().display_name))?;

    // In non-interactive mode, install without asking
    if args.yes {
        cliclack::log::info(format!("Running: {} (--yes mode)", tool.install_command()))?;
        install_tool(&tool).await?;
        return Ok(installed);
    }

    let action: &str = cliclack::select("What would you like to do?")
        .item(
            "install",
            format!("Install {} automatically", tool.config().display_name),
            tool.install_command(),
        )
        .item("npx", format!("Use {}", npx), "downloads on every run")
        .item(
            "docs",
            format!("Open documentation ({})", tool.config().docs_url),
            "",
        )
        .item("cancel", "Cancel", "")
        .interact()?;

    match action {
        "install" => {
            cliclack::log::info(format!("This will execute: {}", tool.install_command()))?;

            let confirm: bool = cliclack::confirm("Proceed with installation?")
                .initial_value(true)
                .interact()?;
            if !confirm {
                anyhow::bail!("Setup cancelled.");
            }

            install_tool(&tool).await?;
            Ok(installed)
        }
        "npx" => Ok(npx),
        "docs" => {
            tool.open_docs()?;
            cliclack::outro(format!(
                "After installing {}, run this command again.",
                tool.config().display_name
            ))?;
            std::process::exit(0);
        }
        _ => anyhow::bail!("Setup cancelled."),
    }
}

/// Install globally, then make sure the binary is reachable
async fn install_tool(tool: &ToolManager) -> Result<()> {
    tool.install().await?;
    if !tool.is_installed() {
        anyhow::bail!(
            "{} was installed but `{}` is not on PATH. Check the global bin directory of your package manager.",
            tool.config().display_name,
            tool.config().name
        );
    }
    cliclack::log::success(format!(
        "{} installed successfully",
        tool.config().display_name
    ))?;
    Ok(())
}

/// Commands to try once the project exists
fn next_steps(project: &Project, config: &ScaffoldConfig) -> Vec<String> {
    let mut steps = vec![format!("cd {}", project.working_dir().display())];
    if config.skip_install {
        steps.push(format!(
            "{} {}",
            config.package_manager.program(),
            config
                .package_manager
                .dev_install_args(crate::config::TYPESCRIPT_DEV_PACKAGES)
                .join(" ")
        ));
    }
    steps.push("npm run start:android   # or npm run start:ios".to_string());
    steps.push("npm test".to_string());
    if config.vscode_tasks {
        steps.push("code .   # tasks are under Terminal > Run Task".to_string());
    }
    steps
}

fn print_next_steps(project: &Project, config: &ScaffoldConfig) -> Result<()> {
    let steps = next_steps(project, config);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro(format!(
        "Built {}. You can find it at: {}",
        project.name(),
        project.working_dir().display()
    ))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_environment() {
        let env = ScaffoldConfig {
            package_manager: PackageManager::Yarn,
            template_dir: Some(PathBuf::from("/env/templates")),
            ..ScaffoldConfig::default()
        };
        let args = CreateArgs {
            project_name: "App".to_string(),
            package_manager: Some(PackageManager::Npm),
            vscode_tasks: true,
            ..CreateArgs::default()
        };

        let config = resolve_config(&args, env);
        assert_eq!(config.package_manager, PackageManager::Npm);
        // Unset flags keep the environment value
        assert_eq!(config.template_dir, Some(PathBuf::from("/env/templates")));
        assert!(config.vscode_tasks);
        assert!(!config.skip_install);
    }

    #[test]
    fn test_resolve_parent() {
        let cwd = Path::new("/home/dev");
        assert_eq!(resolve_parent(None, cwd), PathBuf::from("/home/dev"));
        assert_eq!(
            resolve_parent(Some(Path::new("apps")), cwd),
            PathBuf::from("/home/dev/apps")
        );
        assert_eq!(
            resolve_parent(Some(Path::new("/srv")), cwd),
            PathBuf::from("/srv")
        );
    }

    #[test]
    fn test_next_steps_mention_skipped_install() {
        let project = Project::new("App", "/tmp");
        let config = ScaffoldConfig {
            skip_install: true,
            ..ScaffoldConfig::default()
        };

        let steps = next_steps(&project, &config);
        assert_eq!(steps[0], "cd /tmp/App");
        assert!(steps[1].starts_with("npm install --save-dev typescript"));
        assert!(steps.iter().any(|s| s == "npm test"));
    }
}
