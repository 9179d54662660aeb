//! Build command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::build::{BuildContext, BuildOptions, BuildPipeline};
use crate::compiler::PawnCompiler;
use crate::config::loader::{find_config, load_config_file, merge_cli_overrides, CliOverrides};
use crate::config::AmxConfig;
use crate::logger::{BuildLog, ConsoleLog};

/// Load config and determine the project root, from an explicit path or by
/// walking up from the current directory.
pub(crate) fn load_project(
    config_arg: Option<&Path>,
    verbose: bool,
) -> Result<(AmxConfig, std::path::PathBuf), String> {
    let config_path = match config_arg {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(path) => {
            if verbose {
                println!("Using config: {}", path.display());
            }
            let config =
                load_config_file(&path).map_err(|e| format!("Error loading config: {}", e))?;
            let root = path
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
            Ok((config, root))
        }
        None => {
            if verbose {
                println!("No amxbuild.toml found, using defaults");
            }
            let root = std::env::current_dir().unwrap_or_default();
            Ok((crate::config::loader::default_config(), root))
        }
    }
}

/// Run the build command
pub fn run_build(
    config_arg: Option<&Path>,
    out: Option<&Path>,
    src: Option<&Path>,
    compiler_dir: Option<&Path>,
    ignore_errors: bool,
    verbose: bool,
    no_color: bool,
) -> ExitCode {
    let (mut config, project_root) = match load_project(config_arg, verbose) {
        Ok(loaded) => loaded,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let overrides = CliOverrides {
        plugins: out.map(|p| p.to_path_buf()),
        scripts: src.map(|p| vec![p.to_path_buf()]),
        compiler_dir: compiler_dir.map(|p| p.to_path_buf()),
        ..Default::default()
    };
    merge_cli_overrides(&mut config, &overrides);

    let context = BuildContext::new(config, project_root).with_verbose(verbose);

    let mut log = ConsoleLog::new().with_verbose(verbose);
    if no_color {
        log = log.with_color(false);
    }

    let compiler = PawnCompiler::new(context.compiler_executable())
        .with_include_dirs(context.include_search_path());
    let pipeline = BuildPipeline::new(&context, &compiler, &log)
        .with_options(BuildOptions { ignore_errors });

    match pipeline.build() {
        Ok(report) if report.is_success() => ExitCode::from(EXIT_SUCCESS),
        Ok(_) => ExitCode::from(EXIT_ERROR),
        Err(e) => {
            log.error(&format!("Build error: {}", e));
            ExitCode::from(EXIT_ERROR)
        }
    }
}
