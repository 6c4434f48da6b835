// src/cli.rs
//! CLI definitions for legacify
//!
//! Running without a subcommand is the same as `legacify build`. Build flags
//! given before a subcommand are rejected rather than ignored.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "legacify")]
#[command(author = "Legacify Contributors")]
#[command(version)]
#[command(about = "Rewrite an ES-module GNOME Shell extension into the legacy imports dialect", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub build: BuildArgs,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Args, Clone)]
pub struct BuildArgs {
    /// Project root (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file (default: <root>/legacify.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Fail on import statements that never close
    #[arg(long)]
    pub strict: bool,

    /// Create missing output directories
    #[arg(long)]
    pub create_dirs: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Transpile the source tree and patch metadata.json
    Build {
        #[command(flatten)]
        args: BuildArgs,
    },

    /// List the effective import table in evaluation order
    Mappings {
        /// Project root (default: current directory)
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Config file (default: <root>/legacify.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
