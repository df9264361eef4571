use crate::{
    config::{Config, effective_source_dirs},
    discovery::SourceScanner,
    error::{ConfigurationError, Result},
    project::Project,
};
use std::fs;
use tracing::{debug, info};

const OPTIMIZATIONS_FLAG: &str = "-opt";
const MULTI_PLATFORM_FLAG: &str = "-Xmulti-platform";
const OUTPUT_FLAG: &str = "-o";

/// Assembles the ordered `kotlinc-native` argument vector: feature flags,
/// the output pair, then one token per discovered source file.
pub struct CommandBuilder;

impl CommandBuilder {
    /// Builds the argument vector for one compilation.
    ///
    /// May create the output directory. Fails with a
    /// [`ConfigurationError`] when that directory cannot be created or
    /// exists as a non-directory path, or when discovery hits an
    /// unexpected error; no partial vector is ever returned.
    pub fn build_args(
        config: &Config,
        project: &Project,
        scanner: &SourceScanner,
    ) -> Result<Vec<String>> {
        let mut args = Vec::new();

        if config.optimizations {
            args.push(OPTIMIZATIONS_FLAG.to_string());
        }

        if config.multi_platform {
            args.push(MULTI_PLATFORM_FLAG.to_string());
        }

        let output_dir = match config.output_dir.as_deref() {
            Some(dir) => project.resolve(dir),
            None => project.build_dir.clone(),
        };
        if !output_dir.exists() {
            info!("Creating target folder {}", output_dir.display());
            fs::create_dir_all(&output_dir).map_err(|e| {
                ConfigurationError::with_source(
                    format!(
                        "Failed to create target folder {} for native executable",
                        output_dir.display()
                    ),
                    e,
                )
            })?;
        }
        if !output_dir.is_dir() {
            return Err(ConfigurationError::new(format!(
                "Path {} is not a folder that can contain the native executable",
                output_dir.display()
            )));
        }

        let output_name = config
            .output_name
            .as_deref()
            .unwrap_or(&project.artifact_id);
        let output_dir = fs::canonicalize(&output_dir)
            .map_err(ConfigurationError::during_resolution)?;
        let output_file = output_dir.join(output_name);
        let output_token = safe_file_name(&output_file.to_string_lossy());
        info!("Compiling application into {output_token}");
        args.push(OUTPUT_FLAG.to_string());
        args.push(output_token);

        debug!(
            "Listing sources with include filters {:?} and exclude filters {:?}",
            config.includes, config.excludes
        );
        let source_dirs = effective_source_dirs(
            &config.source_dirs,
            &project.compile_source_roots,
            &config.additional_source_dirs,
        );

        let mut sources = Vec::new();
        for dir in &source_dirs {
            let dir = project.resolve(dir);
            if !dir.exists() {
                debug!("Skipping missing source folder {}", dir.display());
                continue;
            }
            for file in scanner.scan(&dir)? {
                let canonical =
                    fs::canonicalize(&file).map_err(ConfigurationError::during_resolution)?;
                sources.push(safe_file_name(&canonical.to_string_lossy()));
            }
        }
        info!("Adding {} files to command line arguments", sources.len());
        args.extend(sources);

        Ok(args)
    }
}

/// Wraps a path in double quotes iff it contains a space. Nothing else is
/// escaped; paths holding both spaces and quote characters are passed
/// through as-is between the added quotes.
fn safe_file_name(path: &str) -> String {
    if path.contains(' ') {
        format!("\"{path}\"")
    } else {
        path.to_string()
    }
}
