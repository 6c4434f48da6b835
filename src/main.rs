// src/main.rs

mod cli;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use cli::{BuildArgs, Cli, Commands};
use legacify::{Config, Transpiler};
use std::path::{Path, PathBuf};
use tracing::info;

/// Resolve the project root, defaulting to the working directory
fn project_root(root: Option<PathBuf>) -> Result<PathBuf> {
    match root {
        Some(root) => Ok(root),
        None => std::env::current_dir().context("Failed to determine current directory"),
    }
}

fn load_config(root: &Path, config: Option<&Path>) -> Result<Config> {
    match config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Config::discover(root).context("Failed to load project config"),
    }
}

fn cmd_build(args: BuildArgs) -> Result<()> {
    let root = project_root(args.root)?;
    let mut config = load_config(&root, args.config.as_deref())?;
    config.build.strict |= args.strict;
    config.build.create_dirs |= args.create_dirs;

    let transpiler = Transpiler::new(&root, &config)?;
    let report = transpiler
        .run()
        .with_context(|| format!("Transpile of {} failed", root.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }
    Ok(())
}

fn cmd_mappings(root: Option<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    let root = project_root(root)?;
    let config = load_config(&root, config.as_deref())?;
    let transpiler = Transpiler::new(&root, &config)?;

    for (idx, mapping) in transpiler.import_table().iter().enumerate() {
        println!("{:3}  {}", idx + 1, mapping.matcher);
        println!("     -> {}", mapping.emit);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber for logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Build { args }) => cmd_build(args),
        Some(Commands::Mappings { root, config }) => cmd_mappings(root, config),
        Some(Commands::Completions { shell }) => {
            info!("Generating {} completions", shell);
            clap_complete::generate(shell, &mut Cli::command(), "legacify", &mut std::io::stdout());
            Ok(())
        }
        None => cmd_build(cli.build),
    }
}
