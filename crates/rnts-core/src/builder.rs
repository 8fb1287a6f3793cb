//! The ordered scaffolding pipeline
//!
//! Each [`Step`] assumes the previous one left the project tree in place.
//! The first failure stops the run and nothing is rolled back.

use crate::cleanup;
use crate::config::{detect_generator, GeneratorCommand, ScaffoldConfig, TYPESCRIPT_DEV_PACKAGES};
use crate::edits::{android, apply_to_file, gitignore, gradle, ios, package_json};
use crate::error::{ScaffoldError, ScaffoldResult};
use crate::project::Project;
use crate::runtime::command::{CommandRunner, Invocation};
use crate::templates::{
    check_compatibility, copy_group, copy_template, TemplateFetcher, TemplateSource, VSCODE_GROUP,
};
use std::fmt;
use tracing::info;

/// Shown when a local template is newer than this CLI
pub const UPGRADE_COMMAND: &str = "cargo install rnts-tools --force";

/// One stage of the pipeline, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Generate,
    InstallPackages,
    ImportTemplates,
    UpdateEntryPoints,
    AddScripts,
    AddJest,
    RemoveGenerated,
    ImportVscodeTasks,
}

impl Step {
    pub const ALL: [Step; 8] = [
        Step::Generate,
        Step::InstallPackages,
        Step::ImportTemplates,
        Step::UpdateEntryPoints,
        Step::AddScripts,
        Step::AddJest,
        Step::RemoveGenerated,
        Step::ImportVscodeTasks,
    ];

    /// Progress message shown while the step runs
    pub fn label(&self) -> &'static str {
        match self {
            Step::Generate => "Creating react-native project...",
            Step::InstallPackages => "Installing TypeScript dev packages...",
            Step::ImportTemplates => "Importing TypeScript files...",
            Step::UpdateEntryPoints => "Updating entry file paths...",
            Step::AddScripts => "Adding TypeScript scripts to package.json...",
            Step::AddJest => "Adding TypeScript jest test presets to package.json...",
            Step::RemoveGenerated => "Removing unnecessary react-native files...",
            Step::ImportVscodeTasks => "Importing vscode tasks to the project...",
        }
    }

    /// Message shown once the step succeeded
    pub fn done(&self) -> &'static str {
        match self {
            Step::Generate => "Created react-native project",
            Step::InstallPackages => "Installed TypeScript dev packages",
            Step::ImportTemplates => "Imported TypeScript files",
            Step::UpdateEntryPoints => "Pointed native entry files at artifacts/",
            Step::AddScripts => "Added TypeScript scripts",
            Step::AddJest => "Added jest preset",
            Step::RemoveGenerated => "Removed unnecessary react-native files",
            Step::ImportVscodeTasks => "Imported vscode tasks",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Generate => "generate",
            Step::InstallPackages => "install-packages",
            Step::ImportTemplates => "import-templates",
            Step::UpdateEntryPoints => "update-entry-points",
            Step::AddScripts => "add-scripts",
            Step::AddJest => "add-jest",
            Step::RemoveGenerated => "remove-generated",
            Step::ImportVscodeTasks => "import-vscode-tasks",
        };
        write!(f, "{}", name)
    }
}

/// Runs the pipeline for one project
pub struct ProjectBuilder<R: CommandRunner> {
    project: Project,
    config: ScaffoldConfig,
    generator: GeneratorCommand,
    fetcher: TemplateFetcher,
    runner: R,
}

impl<R: CommandRunner> ProjectBuilder<R> {
    /// Uses the configured generator, or detects one on `PATH`
    pub fn new(project: Project, config: ScaffoldConfig, runner: R) -> Self {
        let generator = config.generator.clone().unwrap_or_else(detect_generator);
        let fetcher = TemplateFetcher::new(TemplateSource::from_option(config.template_dir.clone()));
        Self {
            project,
            config,
            generator,
            fetcher,
            runner,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn config(&self) -> &ScaffoldConfig {
        &self.config
    }

    /// Steps this configuration runs, in order
    pub fn plan(&self) -> Vec<Step> {
        Step::ALL
            .into_iter()
            .filter(|step| match step {
                Step::InstallPackages => !self.config.skip_install,
                Step::ImportVscodeTasks => self.config.vscode_tasks,
                _ => true,
            })
            .collect()
    }

    /// Run the whole plan, stopping at the first failure
    pub async fn build(&self) -> ScaffoldResult<()> {
        info!(
            project = %self.project.name(),
            dir = %self.project.working_dir().display(),
            "building React Native TypeScript project"
        );
        for step in self.plan() {
            self.run_step(step).await?;
        }
        info!(dir = %self.project.working_dir().display(), "project built");
        Ok(())
    }

    /// Run a single step
    pub async fn run_step(&self, step: Step) -> ScaffoldResult<()> {
        info!(%step, "{}", step.label());
        match step {
            Step::Generate => self.generate().await,
            Step::InstallPackages => self.install_packages().await,
            Step::ImportTemplates => self.import_templates().await,
            Step::UpdateEntryPoints => self.update_entry_points().await,
            Step::AddScripts => self.add_scripts().await,
            Step::AddJest => self.add_jest().await,
            Step::RemoveGenerated => self.remove_generated().await,
            Step::ImportVscodeTasks => self.import_vscode_tasks().await,
        }
    }

    /// Warning when a local template expects a newer CLI
    pub async fn compatibility_warning(&self, cli_version: &str) -> ScaffoldResult<Option<String>> {
        let manifest = self.fetcher.fetch_manifest().await?;
        Ok(check_compatibility(
            cli_version,
            &manifest.version,
            UPGRADE_COMMAND,
        ))
    }

    async fn generate(&self) -> ScaffoldResult<()> {
        self.project.ensure_vacant()?;

        let invocation = Invocation::new(
            self.generator.program.clone(),
            self.generator.init_args(self.project.name()),
            self.project.parent(),
        );
        self.runner.run(&invocation).await?;

        if !self.project.working_dir().is_dir() {
            return Err(ScaffoldError::GeneratorProducedNothing {
                path: self.project.working_dir().to_path_buf(),
            });
        }
        Ok(())
    }

    async fn install_packages(&self) -> ScaffoldResult<()> {
        let manager = self.config.package_manager;
        let invocation = Invocation::new(
            manager.program(),
            manager.dev_install_args(TYPESCRIPT_DEV_PACKAGES),
            self.project.working_dir(),
        );
        self.runner.run(&invocation).await?;
        Ok(())
    }

    async fn import_templates(&self) -> ScaffoldResult<()> {
        let manifest = self.fetcher.fetch_manifest().await?;
        let copied = copy_template(
            &self.fetcher,
            &manifest,
            self.project.working_dir(),
            &[],
            self.project.name(),
        )
        .await?;
        info!(count = copied.len(), "imported template files");
        Ok(())
    }

    async fn update_entry_points(&self) -> ScaffoldResult<()> {
        let android_dir = self.project.android_dir();

        apply_to_file(
            &gradle::build_gradle_path(&android_dir),
            gradle::point_entry_file,
        )
        .await?;

        let main_application = android::find_main_application(&android_dir)?;
        apply_to_file(&main_application, android::point_main_module).await?;

        let app_delegate = ios::find_app_delegate(&self.project.ios_dir(), self.project.name())?;
        apply_to_file(&app_delegate, ios::point_bundle_root).await?;
        Ok(())
    }

    async fn add_scripts(&self) -> ScaffoldResult<()> {
        apply_to_file(&self.project.manifest_path(), package_json::rewrite_scripts).await?;
        gitignore::update(self.project.working_dir()).await
    }

    async fn add_jest(&self) -> ScaffoldResult<()> {
        apply_to_file(&self.project.manifest_path(), package_json::rewrite_jest).await?;
        Ok(())
    }

    async fn remove_generated(&self) -> ScaffoldResult<()> {
        let removed = cleanup::remove_generated(self.project.working_dir()).await?;
        info!(count = removed.len(), "removed generated files");
        Ok(())
    }

    async fn import_vscode_tasks(&self) -> ScaffoldResult<()> {
        let manifest = self.fetcher.fetch_manifest().await?;
        copy_group(
            &self.fetcher,
            &manifest,
            self.project.working_dir(),
            VSCODE_GROUP,
            self.project.name(),
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::command::CommandOutput;
    use crate::test_support::{write_generated_project, write_modern_generated_project};
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Pretends to be `react-native init` and the package manager
    #[derive(Default)]
    struct FakeRunner {
        invocations: RefCell<Vec<Invocation>>,
        generate_nothing: bool,
        modern: bool,
        fail_program: Option<&'static str>,
    }

    impl CommandRunner for FakeRunner {
        async fn run(&self, invocation: &Invocation) -> ScaffoldResult<CommandOutput> {
            self.invocations.borrow_mut().push(invocation.clone());

            if self.fail_program == Some(invocation.program.as_str()) {
                return Err(ScaffoldError::CommandFailed {
                    command: invocation.to_string(),
                    code: 1,
                    stderr: "npm ERR! network".to_string(),
                });
            }

            if invocation.program == "react-native" && !self.generate_nothing {
                let name = invocation.args.last().expect("project name argument");
                let working_dir = invocation.cwd.join(name);
                if self.modern {
                    write_modern_generated_project(&working_dir, name);
                } else {
                    write_generated_project(&working_dir, name);
                }
            }
            Ok(CommandOutput::default())
        }
    }

    fn config() -> ScaffoldConfig {
        ScaffoldConfig {
            generator: Some(GeneratorCommand::new("react-native", &[])),
            ..ScaffoldConfig::default()
        }
    }

    fn builder(temp: &TempDir, config: ScaffoldConfig, runner: FakeRunner) -> ProjectBuilder<FakeRunner> {
        ProjectBuilder::new(Project::new("AwesomeApp", temp.path()), config, runner)
    }

    fn read(temp: &TempDir, path: &str) -> String {
        std::fs::read_to_string(temp.path().join("AwesomeApp").join(path)).unwrap()
    }

    #[test]
    fn test_plan_follows_flags() {
        let temp = TempDir::new().unwrap();

        let default_plan = builder(&temp, config(), FakeRunner::default()).plan();
        assert_eq!(default_plan, Step::ALL[..7].to_vec());

        let lean = ScaffoldConfig {
            skip_install: true,
            vscode_tasks: true,
            ..config()
        };
        let plan = builder(&temp, lean, FakeRunner::default()).plan();
        assert!(!plan.contains(&Step::InstallPackages));
        assert_eq!(plan.last(), Some(&Step::ImportVscodeTasks));
        assert_eq!(plan.first(), Some(&Step::Generate));
    }

    #[tokio::test]
    async fn test_build_wires_typescript_into_project() {
        let temp = TempDir::new().unwrap();
        let b = builder(&temp, config(), FakeRunner::default());
        b.build().await.unwrap();

        let invocations = b.runner.invocations.borrow();
        assert_eq!(invocations.len(), 2);
        assert_eq!(invocations[0].to_string(), "react-native init AwesomeApp");
        assert_eq!(invocations[0].cwd, temp.path());
        assert!(invocations[1]
            .to_string()
            .starts_with("npm install --save-dev typescript tslint"));
        assert_eq!(invocations[1].cwd, temp.path().join("AwesomeApp"));

        // Templates
        assert!(read(&temp, "tsconfig.json").contains("\"outDir\": \"artifacts\""));
        assert!(read(&temp, "src/index.android.tsx").contains("'AwesomeApp'"));
        assert!(!temp.path().join("AwesomeApp/.vscode").exists());

        // Entry points
        assert!(read(&temp, "android/app/build.gradle")
            .contains("entryFile: \"artifacts/index.android.js\""));
        assert!(read(
            &temp,
            "android/app/src/main/java/com/awesomeapp/MainApplication.java"
        )
        .contains("return \"artifacts/index.android\";"));
        assert!(read(&temp, "ios/AwesomeApp/AppDelegate.m")
            .contains("jsBundleURLForBundleRoot:@\"artifacts/index.ios\""));

        // Manifest
        let manifest: serde_json::Value =
            serde_json::from_str(&read(&temp, "package.json")).unwrap();
        assert_eq!(manifest["scripts"]["build"], "tsc");
        assert_eq!(manifest["jest"]["preset"], "react-native");
        assert!(read(&temp, ".gitignore").contains("artifacts/"));

        // Leftovers
        assert!(!temp.path().join("AwesomeApp/index.android.js").exists());
        assert!(!temp.path().join("AwesomeApp/__tests__").exists());
        assert!(!temp.path().join("AwesomeApp/.flowconfig").exists());
    }

    #[tokio::test]
    async fn test_build_on_modern_generator_output() {
        let temp = TempDir::new().unwrap();
        let runner = FakeRunner {
            modern: true,
            ..FakeRunner::default()
        };
        builder(&temp, config(), runner).build().await.unwrap();

        // Jest section appended although `jest` is only a dev dependency
        let manifest: serde_json::Value =
            serde_json::from_str(&read(&temp, "package.json")).unwrap();
        assert_eq!(manifest["jest"]["preset"], "react-native");
        assert_eq!(manifest["devDependencies"]["jest"], "^29.2.1");
        assert_eq!(manifest["scripts"]["build"], "tsc");

        // Hermes setting survives in the single ext.react map
        let gradle = read(&temp, "android/app/build.gradle");
        assert!(gradle.contains("entryFile: \"artifacts/index.android.js\","));
        assert!(gradle.contains("enableHermes: true"));
        assert_eq!(gradle.matches("\nproject.ext.react = [").count(), 1);

        assert!(read(
            &temp,
            "android/app/src/main/java/com/awesomeapp/MainApplication.java"
        )
        .contains("return \"artifacts/index.android\";"));
        assert!(read(&temp, "ios/AwesomeApp/AppDelegate.mm")
            .contains("jsBundleURLForBundleRoot:@\"artifacts/index.ios\""));

        // One Jest config, one copy of the app sources
        let root = temp.path().join("AwesomeApp");
        assert!(!root.join("jest.config.js").exists());
        assert!(!root.join("App.tsx").exists());
        assert!(!root.join("__tests__").exists());
        assert!(root.join("src/App.tsx").exists());
        assert!(root.join("src/__tests__/App.test.tsx").exists());
        assert!(root.join("babel.config.js").exists());
    }

    #[tokio::test]
    async fn test_second_build_fails_before_running_anything() {
        let temp = TempDir::new().unwrap();
        builder(&temp, config(), FakeRunner::default())
            .build()
            .await
            .unwrap();

        let again = builder(&temp, config(), FakeRunner::default());
        let err = again.build().await.unwrap_err();
        assert!(matches!(err, ScaffoldError::ProjectExists { .. }));
        assert!(again.runner.invocations.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_vscode_tasks_and_skip_install() {
        let temp = TempDir::new().unwrap();
        let cfg = ScaffoldConfig {
            skip_install: true,
            vscode_tasks: true,
            ..config()
        };
        let b = builder(&temp, cfg, FakeRunner::default());
        b.build().await.unwrap();

        assert_eq!(b.runner.invocations.borrow().len(), 1);
        assert!(read(&temp, ".vscode/tasks.json").contains("\"start:android\""));
    }

    #[tokio::test]
    async fn test_generator_without_output_is_reported() {
        let temp = TempDir::new().unwrap();
        let runner = FakeRunner {
            generate_nothing: true,
            ..FakeRunner::default()
        };
        let err = builder(&temp, config(), runner).build().await.unwrap_err();
        assert!(matches!(err, ScaffoldError::GeneratorProducedNothing { .. }));
    }

    #[tokio::test]
    async fn test_failed_install_stops_pipeline() {
        let temp = TempDir::new().unwrap();
        let runner = FakeRunner {
            fail_program: Some("npm"),
            ..FakeRunner::default()
        };
        let err = builder(&temp, config(), runner).build().await.unwrap_err();
        assert!(matches!(err, ScaffoldError::CommandFailed { .. }));

        // Generated tree is left as-is, later steps never ran
        assert!(temp.path().join("AwesomeApp/index.android.js").exists());
        assert!(!temp.path().join("AwesomeApp/tsconfig.json").exists());
    }

    #[tokio::test]
    async fn test_embedded_template_is_compatible() {
        let temp = TempDir::new().unwrap();
        let b = builder(&temp, config(), FakeRunner::default());
        assert!(b
            .compatibility_warning(env!("CARGO_PKG_VERSION"))
            .await
            .unwrap()
            .is_none());
        assert!(b.compatibility_warning("0.0.1").await.unwrap().is_some());
    }
}
