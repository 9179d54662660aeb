//! External Pawn compiler invocation.
//!
//! Wraps the `amxxpc` executable: builds its argument list, runs it as a
//! subprocess, and turns the captured output into a structured
//! [`CompileResult`]. The compiler's semantic verdict decides success — a
//! zero exit status with error diagnostics is still a failed compile, and a
//! successful compile must leave the artifact on disk.

use crate::diagnostics::{self, Diagnostic};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// File extension of compiled plugins.
pub const ARTIFACT_EXTENSION: &str = "amxx";

/// Error launching or preparing the compiler subprocess.
///
/// A compile that runs and fails is not an error at this level; it is a
/// [`CompileResult`] with `success == false`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// The compiler executable could not be spawned
    #[error("failed to run compiler '{}': {source}", .executable.display())]
    Launch {
        /// Executable that failed to start
        executable: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
    /// The destination directory could not be created
    #[error("failed to prepare output directory '{}': {source}", .dir.display())]
    OutputDir {
        /// Directory that could not be created
        dir: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of one compiler invocation.
///
/// Produced fresh per invocation and never mutated after return.
#[derive(Debug, Clone)]
pub struct CompileResult {
    /// The compiler's semantic verdict
    pub success: bool,
    /// Artifact file name relative to the destination directory;
    /// `Some` exactly when `success`
    pub artifact: Option<String>,
    /// Human-readable failure text; `Some` exactly when not `success`
    pub error: Option<String>,
    /// Every output line, classified, in emission order
    pub messages: Vec<Diagnostic>,
}

impl CompileResult {
    /// Create a successful result.
    pub fn succeeded(artifact: String, messages: Vec<Diagnostic>) -> Self {
        Self { success: true, artifact: Some(artifact), error: None, messages }
    }

    /// Create a failed result.
    pub fn failed(error: String, messages: Vec<Diagnostic>) -> Self {
        Self { success: false, artifact: None, error: Some(error), messages }
    }
}

/// Compiled artifact name for a script source (`admin.sma` -> `admin.amxx`).
pub fn artifact_name(source: &Path) -> String {
    let stem = source.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    format!("{}.{}", stem, ARTIFACT_EXTENSION)
}

/// Compiles a single script into a destination directory.
///
/// The one seam between the orchestrator and the external toolchain;
/// tests substitute a recording fake.
pub trait ScriptCompiler {
    /// Compile `source`, placing the artifact in `dest_dir`.
    fn compile(&self, source: &Path, dest_dir: &Path) -> Result<CompileResult, CompileError>;
}

/// The real `amxxpc` subprocess invoker.
pub struct PawnCompiler {
    executable: PathBuf,
    include_dirs: Vec<PathBuf>,
}

impl PawnCompiler {
    /// Create an invoker for the given compiler executable.
    pub fn new(executable: PathBuf) -> Self {
        Self { executable, include_dirs: Vec::new() }
    }

    /// Set the include search path, passed to the compiler in order.
    pub fn with_include_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.include_dirs = dirs;
        self
    }

    /// The configured include search path.
    pub fn include_dirs(&self) -> &[PathBuf] {
        &self.include_dirs
    }
}

impl ScriptCompiler for PawnCompiler {
    fn compile(&self, source: &Path, dest_dir: &Path) -> Result<CompileResult, CompileError> {
        fs::create_dir_all(dest_dir)
            .map_err(|e| CompileError::OutputDir { dir: dest_dir.to_path_buf(), source: e })?;

        let artifact = artifact_name(source);
        let output_path = dest_dir.join(&artifact);

        let mut command = Command::new(&self.executable);
        command.arg(source).arg(format!("-o{}", output_path.display()));
        for dir in &self.include_dirs {
            command.arg(format!("-i{}", dir.display()));
        }

        let output = command.output().map_err(|e| CompileError::Launch {
            executable: self.executable.clone(),
            source: e,
        })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        let messages = diagnostics::parse_output(&combined);

        if !output.status.success() {
            let error = format!("compiler exited with {}", output.status);
            return Ok(CompileResult::failed(error, messages));
        }

        if diagnostics::has_errors(&messages) {
            let count = messages.iter().filter(|m| m.severity.is_error()).count();
            let error = format!(
                "{} error{} while compiling {}",
                count,
                if count == 1 { "" } else { "s" },
                source.display()
            );
            return Ok(CompileResult::failed(error, messages));
        }

        if !output_path.is_file() {
            let error = format!(
                "compiler reported success but produced no artifact at {}",
                output_path.display()
            );
            return Ok(CompileResult::failed(error, messages));
        }

        Ok(CompileResult::succeeded(artifact, messages))
    }
}
