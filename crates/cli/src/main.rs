use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use kotlinc_runner_core::{CompilerRunner, Project};
use std::env;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// A tool for building and running Kotlin/Native executables
#[derive(Parser)]
#[command(name = "kotlinc-runner")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile the project with kotlinc-native
    Run {
        /// Custom project root (defaults to current directory)
        #[arg(long = "project-root")]
        project_root: Option<String>,

        /// Show the command without executing it
        #[arg(short = 'd', long = "dry-run")]
        dry_run: bool,
    },
    /// Show the resolved compiler invocation
    Show {
        /// Custom project root (defaults to current directory)
        #[arg(long = "project-root")]
        project_root: Option<String>,
    },
    /// Initialize a starter kotlinc-runner configuration
    Init {
        /// Custom project root (defaults to current directory)
        #[arg(long = "project-root")]
        project_root: Option<String>,

        /// Force overwrite an existing configuration file
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
}

fn main() -> Result<()> {
    // Initialize tracing based on RUST_LOG env var
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            project_root,
            dry_run,
        } => run_command(project_root.as_deref(), dry_run),
        Commands::Show { project_root } => show_command(project_root.as_deref()),
        Commands::Init {
            project_root,
            force,
        } => init_command(project_root.as_deref(), force),
    }
}

fn resolve_root(project_root: Option<&str>) -> Result<PathBuf> {
    let root = match project_root {
        Some(dir) => PathBuf::from(dir),
        None => env::current_dir().context("Failed to get current directory")?,
    };
    root.canonicalize()
        .with_context(|| format!("Failed to canonicalize project root {}", root.display()))
}

fn run_command(project_root: Option<&str>, dry_run: bool) -> Result<()> {
    let root = resolve_root(project_root)?;
    debug!("Running project at: {}", root.display());

    let runner = CompilerRunner::from_project_root(&root)?;
    let command = runner.command()?;
    let shell_cmd = command.to_shell_command();

    if dry_run {
        println!("{shell_cmd}");
        if let Some(dir) = command.working_dir() {
            println!("Working directory: {}", dir.display());
        }
        return Ok(());
    }

    println!("Running: {shell_cmd}");
    let status = command
        .execute()
        .with_context(|| format!("Failed to execute: {shell_cmd}"))?;

    if !status.success() {
        std::process::exit(status.code().unwrap_or(1));
    }

    Ok(())
}

fn show_command(project_root: Option<&str>) -> Result<()> {
    let root = resolve_root(project_root)?;

    println!("🔍 Resolving invocation for: {}", root.display());
    println!("{}", "=".repeat(80));

    let runner = CompilerRunner::from_project_root(&root)?;
    let command = runner.command()?;

    println!("🔧 Command breakdown:");
    println!("   • program: {}", command.resolved_program());

    let args = &command.args;
    if let Some(pos) = args.iter().position(|a| a == "-o") {
        for flag in &args[..pos] {
            println!("   • flag: {flag}");
        }
        println!("   • output: {}", args[pos + 1]);

        let sources = &args[pos + 2..];
        println!("   • sources: {} file(s)", sources.len());
        for source in sources {
            println!("      - {source}");
        }
    }

    if let Some(dir) = command.working_dir() {
        println!("   • working directory: {}", dir.display());
    }

    println!("\n🎯 Command to run:");
    println!("   {}", command.to_shell_command());
    Ok(())
}

fn init_command(project_root: Option<&str>, force: bool) -> Result<()> {
    let root = resolve_root(project_root)?;
    let config_path = root.join(".kotlinc-runner.json");

    if config_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    let project = Project::discover(&root);
    let config = create_default_config(&project.artifact_id)?;
    fs::write(&config_path, config)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!("✅ Created config: {}", config_path.display());
    Ok(())
}

fn create_default_config(artifact_id: &str) -> Result<String> {
    use serde_json::{Map, Value, json};

    let mut config = Map::new();
    config.insert("output_name".to_string(), json!(artifact_id));
    config.insert("source_dirs".to_string(), json!([]));
    config.insert("additional_source_dirs".to_string(), json!([]));
    config.insert("includes".to_string(), json!(["**/*.kt"]));
    config.insert("excludes".to_string(), json!([]));

    serde_json::to_string_pretty(&Value::Object(config))
        .context("Failed to serialize starter config")
}
