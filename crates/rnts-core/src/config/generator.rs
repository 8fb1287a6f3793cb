//! Generator command resolution

use std::fmt;

/// Generators in order of preference: (program, leading args)
const GENERATORS: &[(&str, &[&str])] = &[("react-native", &[]), ("npx", &["react-native"])];

/// A generator command line, without the trailing `init <name>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl GeneratorCommand {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Split a whitespace-separated command line; `None` when blank
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split_whitespace();
        let program = parts.next()?;
        Some(Self {
            program: program.to_string(),
            args: parts.map(str::to_string).collect(),
        })
    }

    /// Full argument list for generating `project_name`
    pub fn init_args(&self, project_name: &str) -> Vec<String> {
        let mut args = self.args.clone();
        args.push("init".to_string());
        args.push(project_name.to_string());
        args
    }

    /// Whether the command answers `--version`
    pub fn is_available(&self) -> bool {
        std::process::Command::new(&self.program)
            .args(&self.args)
            .arg("--version")
            .output()
            .is_ok_and(|o| o.status.success())
    }
}

impl fmt::Display for GeneratorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Every known generator, most preferred first
pub fn known_generators() -> Vec<GeneratorCommand> {
    GENERATORS
        .iter()
        .map(|(program, args)| GeneratorCommand::new(program, args))
        .collect()
}

/// Detect the available generator
pub fn detect_generator() -> GeneratorCommand {
    for generator in known_generators() {
        if generator.is_available() {
            return generator;
        }
    }
    // Default to the global CLI if nothing detected (will fail at run time with a helpful error)
    GeneratorCommand::new(GENERATORS[0].0, GENERATORS[0].1)
}

/// Like [`detect_generator`], but `None` when nothing answers
pub fn find_generator() -> Option<GeneratorCommand> {
    known_generators().into_iter().find(|g| g.is_available())
}
