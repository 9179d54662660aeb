//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod build;
mod init;
mod watch;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// amxbuild - Build AMX Mod X scripting projects
#[derive(Parser)]
#[command(name = "amxbuild")]
#[command(about = "amxbuild - Compile Pawn scripts and sync includes/assets into a dist tree")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a full build: sync assets and includes, compile every script
    Build {
        /// Path to amxbuild.toml (default: discovered by walking up)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the plugins output directory
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Override the script input directory
        #[arg(long)]
        src: Option<PathBuf>,

        /// Override the compiler installation directory
        #[arg(long)]
        compiler_dir: Option<PathBuf>,

        /// Keep building remaining scripts when one fails
        #[arg(long)]
        ignore_errors: bool,

        /// Show per-file copies and compiler echo output
        #[arg(short, long)]
        verbose: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Watch input directories and rebuild changed files
    Watch {
        /// Path to amxbuild.toml (default: discovered by walking up)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Show per-file copies and compiler echo output
        #[arg(short, long)]
        verbose: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Create a new amxbuild project
    Init {
        /// Directory to initialize (default: current directory)
        path: Option<PathBuf>,

        /// Project name (default: directory name)
        #[arg(short, long)]
        name: Option<String>,
    },
}

/// Parse arguments and dispatch to the selected command.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { config, out, src, compiler_dir, ignore_errors, verbose, no_color } => {
            build::run_build(
                config.as_deref(),
                out.as_deref(),
                src.as_deref(),
                compiler_dir.as_deref(),
                ignore_errors,
                verbose,
                no_color,
            )
        }
        Commands::Watch { config, verbose, no_color } => {
            watch::run_watch(config.as_deref(), verbose, no_color)
        }
        Commands::Init { path, name } => init::run_init(path.as_deref(), name.as_deref()),
    }
}
