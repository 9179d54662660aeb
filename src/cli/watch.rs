//! Watch command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::build::BuildContext;
use crate::cli::build::load_project;
use crate::compiler::PawnCompiler;
use crate::logger::ConsoleLog;
use crate::watch::watch_and_rebuild;

/// Run the watch command
pub fn run_watch(config_arg: Option<&Path>, verbose: bool, no_color: bool) -> ExitCode {
    let (config, project_root) = match load_project(config_arg, verbose) {
        Ok(loaded) => loaded,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let context = BuildContext::new(config, project_root).with_verbose(verbose);

    let mut log = ConsoleLog::new().with_verbose(verbose);
    if no_color {
        log = log.with_color(false);
    }

    let compiler = PawnCompiler::new(context.compiler_executable())
        .with_include_dirs(context.include_search_path());

    println!("Starting watch mode...");
    println!("Press Ctrl+C to stop");
    println!();

    match watch_and_rebuild(&context, &compiler, &log) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Watch error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
