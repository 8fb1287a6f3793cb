//! Management of the React Native CLI used as the project generator
//!
//! Checks whether the CLI is on `PATH`, installs it globally through the
//! package manager, or opens its documentation.

use crate::config::PackageManager;
use anyhow::Result;
use colored::Colorize;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Timeout for a global install
const INSTALL_TIMEOUT: Duration = Duration::from_secs(180);

/// Configuration for a globally installed CLI tool
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Name of the tool binary (e.g., "react-native")
    pub name: &'static str,
    /// Display name for user-facing messages
    pub display_name: &'static str,
    /// Package that provides the binary
    pub package: &'static str,
    /// URL to the documentation
    pub docs_url: &'static str,
}

/// Manager for checking and installing CLI tools
pub struct ToolManager {
    config: ToolConfig,
    package_manager: PackageManager,
}

impl ToolManager {
    pub fn new(config: ToolConfig, package_manager: PackageManager) -> Self {
        Self {
            config,
            package_manager,
        }
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Program and arguments of the global install
    pub fn install_args(&self) -> (&'static str, Vec<String>) {
        let mut args = match self.package_manager {
            PackageManager::Npm => vec!["install".to_string(), "-g".to_string()],
            PackageManager::Yarn => vec!["global".to_string(), "add".to_string()],
        };
        args.push(self.config.package.to_string());
        (self.package_manager.program(), args)
    }

    /// Get the install command string
    pub fn install_command(&self) -> String {
        let (program, args) = self.install_args();
        format!("{} {}", program, args.join(" "))
    }

    /// Check if the tool is installed and available in PATH
    pub fn is_installed(&self) -> bool {
        self.get_version().is_some()
    }

    /// Get the installed tool version (if available)
    pub fn get_version(&self) -> Option<String> {
        std::process::Command::new(self.config.name)
            .arg("--version")
            .output()
            .ok()
            .and_then(|output| {
                if output.status.success() {
                    String::from_utf8(output.stdout)
                        .ok()
                        .map(|s| s.lines().next().unwrap_or_default().trim().to_string())
                } else {
                    None
                }
            })
    }

    /// Install the tool globally, streaming the installer's output
    pub async fn install(&self) -> Result<()> {
        let cmd = self.install_command();
        let (program, args) = self.install_args();
        println!();
        println!("{} {}", "Running:".dimmed(), cmd.yellow());
        println!();

        let mut child = TokioCommand::new(program)
            .args(&args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow::anyhow!("Failed to capture installer stdout"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| anyhow::anyhow!("Failed to capture installer stderr"))?;

        let mut stdout_reader = BufReader::new(stdout).lines();
        let mut stderr_reader = BufReader::new(stderr).lines();

        let output_task = async {
            let mut stderr_open = true;
            loop {
                tokio::select! {
                    line = stdout_reader.next_line() => {
                        match line {
                            Ok(Some(line)) => println!("  {}", line),
                            Ok(None) => break,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stdout:".red(), e);
                                break;
                            }
                        }
                    }
                    line = stderr_reader.next_line(), if stderr_open => {
                        match line {
                            Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                            Ok(None) => stderr_open = false,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stderr:".red(), e);
                                stderr_open = false;
                            }
                        }
                    }
                }
            }
        };

        if timeout(INSTALL_TIMEOUT, output_task).await.is_err() {
            let _ = child.kill().await;
            println!();
            anyhow::bail!(
                "Installation timed out after {} seconds.\n\
                 Please try again later or install manually:\n\
                 {}",
                INSTALL_TIMEOUT.as_secs(),
                cmd
            );
        }

        match timeout(Duration::from_secs(5), child.wait()).await {
            Ok(Ok(status)) => {
                println!();
                if status.success() {
                    Ok(())
                } else {
                    anyhow::bail!(
                        "Installation failed with exit code: {}\n\
                         Please try installing manually: {}",
                        status.code().unwrap_or(-1),
                        cmd
                    );
                }
            }
            Ok(Err(e)) => {
                anyhow::bail!("Failed to wait for installer: {}", e);
            }
            Err(_) => {
                let _ = child.kill().await;
                anyhow::bail!(
                    "Installation process hung. Please try installing manually:\n{}",
                    cmd
                );
            }
        }
    }

    /// Open the tool's documentation in the default browser
    pub fn open_docs(&self) -> Result<()> {
        println!(
            "{}",
            format!(
                "Opening {} documentation in your browser...",
                self.config.display_name
            )
            .cyan()
        );
        open::that(self.config.docs_url)?;
        Ok(())
    }
}

/// Pre-configured tool manager for the React Native CLI
pub fn react_native_tool(package_manager: PackageManager) -> ToolManager {
    ToolManager::new(
        ToolConfig {
            name: "react-native",
            display_name: "React Native CLI",
            package: "react-native-cli",
            docs_url: "https://reactnative.dev/docs/environment-setup",
        },
        package_manager,
    )
}
