use crate::error::{ConfigurationError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User-facing compilation options, loaded from a `.kotlinc-runner.json`
/// next to (or above) the project root.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Compiler executable. When unset the runner falls back to
    /// `kotlinc-native`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiler: Option<String>,

    /// Folder receiving the native executable. Defaults to the project
    /// build directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,

    /// Base name of the generated executable. Defaults to the project
    /// artifact id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_name: Option<String>,

    #[serde(default)]
    pub optimizations: bool,

    #[serde(default)]
    pub multi_platform: bool,

    /// Source directories to compile. When empty, the project's compile
    /// source roots are used instead.
    #[serde(default)]
    pub source_dirs: Vec<String>,

    /// Extra source directories, appended after whichever list was taken
    /// for `source_dirs`.
    #[serde(default)]
    pub additional_source_dirs: Vec<String>,

    /// Glob patterns selecting source files. Empty means everything.
    #[serde(default)]
    pub includes: Vec<String>,

    /// Glob patterns removing files from the selection. Excludes win.
    #[serde(default)]
    pub excludes: Vec<String>,
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ConfigurationError::with_source(format!("Failed to read config {}", path.display()), e)
        })?;
        let config = serde_json::from_str(&contents).map_err(|e| {
            ConfigurationError::with_source(format!("Failed to parse config: {e}"), e)
        })?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            ConfigurationError::with_source(format!("Failed to serialize config: {e}"), e)
        })?;
        std::fs::write(path, contents).map_err(|e| {
            ConfigurationError::with_source(format!("Failed to write config {}", path.display()), e)
        })?;
        Ok(())
    }

    /// Walks upward from `start_path` looking for a config file.
    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            let config_path = current.join(".kotlinc-runner.json");
            if config_path.exists() {
                return Some(config_path);
            }

            let config_path = current.join("kotlinc-runner.json");
            if config_path.exists() {
                return Some(config_path);
            }

            current = current.parent()?;
        }
    }
}

/// Resolves the source-directory list for one build.
///
/// `explicit` wins when non-empty, otherwise `fallback` is taken;
/// `additional` is appended in both cases.
pub fn effective_source_dirs(
    explicit: &[String],
    fallback: &[String],
    additional: &[String],
) -> Vec<String> {
    let mut dirs: Vec<String> = if explicit.is_empty() {
        fallback.to_vec()
    } else {
        explicit.to_vec()
    };
    dirs.extend(additional.iter().cloned());
    dirs
}
