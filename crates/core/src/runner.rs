//! Runner facade tying configuration, discovery and execution together

use crate::{
    command::{CommandBuilder, CompilerCommand, DEFAULT_COMPILER},
    config::Config,
    discovery::SourceScanner,
    error::{ConfigurationError, Result},
    project::Project,
};
use std::path::PathBuf;
use std::process::ExitStatus;
use tracing::{debug, info};

/// Builds and runs one `kotlinc-native` invocation for a project.
///
/// Holds no state across invocations: every [`command`](Self::command)
/// call resolves the configuration and rescans sources from scratch.
pub struct CompilerRunner {
    config: Config,
    project: Project,
}

impl CompilerRunner {
    pub fn new(config: Config, project: Project) -> Self {
        Self { config, project }
    }

    /// Loads the nearest config file above `root` (defaults when there is
    /// none) and pairs it with a discovered project descriptor.
    pub fn from_project_root(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let config = match Config::find_config_file(&root) {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                Config::load_from_file(&path)?
            }
            None => {
                debug!("No configuration file found, using defaults");
                Config::default()
            }
        };
        Ok(Self::new(config, Project::discover(root)))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Assembles the full invocation without executing it.
    pub fn command(&self) -> Result<CompilerCommand> {
        let scanner = SourceScanner::new(&self.config.includes, &self.config.excludes)?;
        let args = CommandBuilder::build_args(&self.config, &self.project, &scanner)?;

        let mut command =
            CompilerCommand::new(args).with_working_dir(self.project.root.clone());
        match &self.config.compiler {
            Some(compiler) => command = command.with_program(compiler.clone()),
            None => {
                info!("Setting default value for {DEFAULT_COMPILER} compiler");
                command = command.with_program(DEFAULT_COMPILER.to_string());
            }
        }
        Ok(command)
    }

    /// Runs the compiler, reporting its exit status unchanged. Failing to
    /// launch the executable at all is a configuration error.
    pub fn run(&self) -> Result<ExitStatus> {
        let command = self.command()?;
        info!("Running: {}", command.to_shell_command());
        command.execute().map_err(|e| {
            ConfigurationError::with_source(
                format!("Failed to launch {}", command.resolved_program()),
                e,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &std::path::Path, name: &str) {
        let path = dir.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "fun main() {}").unwrap();
    }

    #[test]
    fn test_command_uses_default_compiler() {
        let temp_dir = TempDir::new().unwrap();
        let runner = CompilerRunner::new(Config::default(), Project::discover(temp_dir.path()));

        let command = runner.command().unwrap();
        assert_eq!(command.resolved_program(), DEFAULT_COMPILER);
        assert!(command.args.contains(&"-o".to_string()));
        assert_eq!(command.working_dir(), Some(temp_dir.path()));
    }

    #[test]
    fn test_command_honors_configured_compiler() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            compiler: Some("kotlinc-native-ea".to_string()),
            ..Default::default()
        };
        let runner = CompilerRunner::new(config, Project::discover(temp_dir.path()));

        let command = runner.command().unwrap();
        assert_eq!(command.resolved_program(), "kotlinc-native-ea");
    }

    #[test]
    fn test_from_project_root_picks_up_config_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(".kotlinc-runner.json"),
            r#"{ "optimizations": true, "includes": ["**/*.kt"] }"#,
        )
        .unwrap();
        touch(temp_dir.path(), "src/main/kotlin/Main.kt");

        let runner = CompilerRunner::from_project_root(temp_dir.path()).unwrap();
        let command = runner.command().unwrap();
        assert_eq!(command.args.first().map(String::as_str), Some("-opt"));
        assert!(command.args.iter().any(|a| a.ends_with("Main.kt")));
    }

    #[test]
    fn test_from_project_root_defaults_without_config() {
        let temp_dir = TempDir::new().unwrap();
        let runner = CompilerRunner::from_project_root(temp_dir.path()).unwrap();
        assert!(!runner.config().optimizations);
    }

    #[cfg(unix)]
    #[test]
    fn test_run_propagates_exit_status() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            compiler: Some("true".to_string()),
            ..Default::default()
        };
        let runner = CompilerRunner::new(config, Project::discover(temp_dir.path()));
        assert!(runner.run().unwrap().success());

        let config = Config {
            compiler: Some("false".to_string()),
            ..Default::default()
        };
        let runner = CompilerRunner::new(config, Project::discover(temp_dir.path()));
        assert_eq!(runner.run().unwrap().code(), Some(1));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_fails_when_compiler_is_missing() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            compiler: Some("definitely-not-a-real-compiler".to_string()),
            ..Default::default()
        };
        let runner = CompilerRunner::new(config, Project::discover(temp_dir.path()));
        let err = runner.run().unwrap_err();
        assert!(err.to_string().contains("Failed to launch"));
    }
}
