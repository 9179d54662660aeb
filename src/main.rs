//! amxbuild - Command-line build tool for AMX Mod X scripting projects

use std::process::ExitCode;

use amxbuild::cli;

fn main() -> ExitCode {
    cli::run()
}
