//! Running external commands (generator, package manager)

use crate::error::{ScaffoldError, ScaffoldResult};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// How many trailing output lines a failure message carries
const FAILURE_TAIL_LINES: usize = 20;

/// A single command to run in a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I, cwd: &Path) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.to_path_buf(),
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured output of a successful command
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

/// Seam between the pipeline and the process table
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run to completion; a non-zero exit is an error
    async fn run(&self, invocation: &Invocation) -> ScaffoldResult<CommandOutput>;
}

/// Runs commands as real child processes
#[derive(Debug, Clone)]
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl CommandRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> ScaffoldResult<CommandOutput> {
        let command = invocation.to_string();
        info!(%command, cwd = %invocation.cwd.display(), "running command");

        let mut child = TokioCommand::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ScaffoldError::CommandSpawn {
                command: command.clone(),
                source,
            })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let finished = async {
            let (stdout, stderr) =
                tokio::join!(read_lines(stdout, "stdout"), read_lines(stderr, "stderr"));
            let status = child.wait().await;
            (stdout, stderr, status)
        };

        let outcome = timeout(self.timeout, finished).await;
        let (stdout, stderr, status) = match outcome {
            Ok(result) => result,
            Err(_) => {
                warn!(%command, "command timed out, killing it");
                let _ = child.kill().await;
                return Err(ScaffoldError::CommandTimedOut {
                    command,
                    timeout: self.timeout,
                });
            }
        };

        let status = status.map_err(|source| ScaffoldError::CommandSpawn {
            command: command.clone(),
            source,
        })?;

        if !status.success() {
            let source_lines = if stderr.is_empty() { &stdout } else { &stderr };
            return Err(ScaffoldError::CommandFailed {
                command,
                code: status.code().unwrap_or(-1),
                stderr: tail(source_lines, FAILURE_TAIL_LINES),
            });
        }

        Ok(CommandOutput { stdout, stderr })
    }
}

async fn read_lines<R>(reader: Option<R>, stream: &'static str) -> Vec<String>
where
    R: AsyncRead + Unpin,
{
    let Some(reader) = reader else {
        return Vec::new();
    };
    let mut lines = BufReader::new(reader).lines();
    let mut collected = Vec::new();
    while let Ok(Some(line)) = lines.next_line().await {
        debug!(stream, "{}", line);
        collected.push(line);
    }
    collected
}

fn tail(lines: &[String], count: usize) -> String {
    let start = lines.len().saturating_sub(count);
    lines[start..].join("\n")
}
