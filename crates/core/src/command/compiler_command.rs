use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// Compiler executable used when the configuration does not name one.
pub const DEFAULT_COMPILER: &str = "kotlinc-native";

/// A fully-resolved compiler invocation: executable, argument vector,
/// working directory and environment. The argument order is the command
/// line.
#[derive(Debug, Clone)]
pub struct CompilerCommand {
    /// Executable to launch. `None` falls back to [`DEFAULT_COMPILER`].
    pub program: Option<String>,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub env: Vec<(String, String)>,
}

impl CompilerCommand {
    pub fn new(args: Vec<String>) -> Self {
        Self {
            program: None,
            args,
            working_dir: None,
            env: Vec::new(),
        }
    }

    pub fn with_program(mut self, program: String) -> Self {
        self.program = Some(program);
        self
    }

    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = Some(dir);
        self
    }

    pub fn with_env(mut self, key: String, value: String) -> Self {
        self.env.push((key, value));
        self
    }

    pub fn resolved_program(&self) -> &str {
        self.program.as_deref().unwrap_or(DEFAULT_COMPILER)
    }

    /// Renders the invocation for display. Tokens already carry their own
    /// quoting, so this is a plain space join.
    pub fn to_shell_command(&self) -> String {
        let mut cmd = String::from(self.resolved_program());
        for arg in &self.args {
            cmd.push(' ');
            cmd.push_str(arg);
        }
        cmd
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// Runs the compiler as one blocking child process and reports its
    /// exit status unchanged.
    pub fn execute(&self) -> io::Result<ExitStatus> {
        let mut cmd = Command::new(self.resolved_program());
        cmd.args(&self.args);

        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        cmd.status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_defaults_to_compiler() {
        let command = CompilerCommand::new(vec!["-o".to_string(), "app".to_string()]);
        assert_eq!(command.resolved_program(), DEFAULT_COMPILER);
    }

    #[test]
    fn test_program_override() {
        let command = CompilerCommand::new(vec![]).with_program("kotlinc-native-ea".to_string());
        assert_eq!(command.resolved_program(), "kotlinc-native-ea");
    }

    #[test]
    fn test_to_shell_command_joins_tokens() {
        let command = CompilerCommand::new(vec![
            "-opt".to_string(),
            "-o".to_string(),
            "\"/tmp/out dir/app\"".to_string(),
        ]);
        assert_eq!(
            command.to_shell_command(),
            "kotlinc-native -opt -o \"/tmp/out dir/app\""
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_propagates_exit_status() {
        let ok = CompilerCommand::new(vec![])
            .with_program("true".to_string())
            .execute()
            .unwrap();
        assert!(ok.success());

        let failed = CompilerCommand::new(vec![])
            .with_program("false".to_string())
            .execute()
            .unwrap();
        assert_eq!(failed.code(), Some(1));
    }
}
