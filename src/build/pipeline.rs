//! Build pipeline orchestration.
//!
//! Runs a full batch: asset sync, include sync, then every script in scan
//! order — strictly sequentially, one compiler subprocess at a time, so
//! diagnostic output keeps a deterministic order. Per-file operations are
//! also exposed individually for watch mode.

use crate::build::{BuildContext, BuildReport, ScriptResult};
use crate::compiler::{CompileError, CompileResult, ScriptCompiler};
use crate::diagnostics::Severity;
use crate::logger::BuildLog;
use crate::paths;
use crate::sync::{self, SyncError};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Batch error-tolerance policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// When true, a failing compile is recorded and the batch continues;
    /// when false, the first failure aborts the remaining files.
    pub ignore_errors: bool,
}

/// Error during build execution.
///
/// Covers infrastructure failures only; a script that compiles with errors
/// is recorded in the [`BuildReport`], not raised here.
#[derive(Debug)]
pub enum BuildError {
    /// Discovery or copy error
    Sync(SyncError),
    /// Compiler could not be launched
    Compile(CompileError),
    /// IO error
    Io(std::io::Error),
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::Sync(e) => write!(f, "Sync error: {}", e),
            BuildError::Compile(e) => write!(f, "Compile error: {}", e),
            BuildError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for BuildError {}

impl From<SyncError> for BuildError {
    fn from(e: SyncError) -> Self {
        BuildError::Sync(e)
    }
}

impl From<CompileError> for BuildError {
    fn from(e: CompileError) -> Self {
        BuildError::Compile(e)
    }
}

impl From<std::io::Error> for BuildError {
    fn from(e: std::io::Error) -> Self {
        BuildError::Io(e)
    }
}

/// Build pipeline for executing batch and single-file builds.
pub struct BuildPipeline<'a> {
    context: &'a BuildContext,
    compiler: &'a dyn ScriptCompiler,
    log: &'a dyn BuildLog,
    options: BuildOptions,
}

impl<'a> BuildPipeline<'a> {
    /// Create a new build pipeline.
    pub fn new(
        context: &'a BuildContext,
        compiler: &'a dyn ScriptCompiler,
        log: &'a dyn BuildLog,
    ) -> Self {
        Self { context, compiler, log, options: BuildOptions::default() }
    }

    /// Set the error-tolerance policy.
    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Run a full build: assets, includes, then the script batch.
    ///
    /// Always ends with exactly one terminal status line. Returns `Err`
    /// only for infrastructure failures (IO, compiler launch); compile
    /// failures are folded into the report.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let start = Instant::now();
        let compiler_cfg = &self.context.config().compiler;
        self.log.debug(&format!(
            "Using compiler {} {}{}",
            compiler_cfg.executable,
            compiler_cfg.version,
            if compiler_cfg.dev { " (dev)" } else { "" }
        ));

        let mut report = BuildReport::new();
        self.sync_all_assets(&mut report)?;
        self.sync_all_includes(&mut report)?;
        self.build_all_scripts(&mut report)?;
        report.total_duration = start.elapsed();

        if report.is_success() {
            self.log.success(&format!("Build succeeded: {}", report.summary()));
        } else {
            self.log.error(&format!("Build finished with errors: {}", report.summary()));
        }

        Ok(report)
    }

    /// Copy every asset into the assets output directory, preserving each
    /// file's path relative to its input root. Skipped entirely unless both
    /// the input and output asset directories are configured.
    fn sync_all_assets(&self, report: &mut BuildReport) -> Result<(), BuildError> {
        let (Some(asset_dirs), Some(out_dir)) =
            (self.context.asset_dirs(), self.context.assets_out_dir())
        else {
            return Ok(());
        };

        let files = sync::scan(&asset_dirs, sync::ASSET_PATTERN)?;
        for file in &files {
            let dest = sync::copy_relative(file, &asset_dirs, &out_dir)?;
            self.log.debug(&format!(
                "Copied asset {} -> {}",
                paths::display_name(&asset_dirs, file),
                dest.display()
            ));
        }
        report.assets_synced = files.len();
        if !files.is_empty() {
            self.log.info(&format!("Synced {} asset file(s)", files.len()));
        }
        Ok(())
    }

    /// Copy every include file flat into the include output directory.
    fn sync_all_includes(&self, report: &mut BuildReport) -> Result<(), BuildError> {
        let include_dirs = self.context.include_dirs();
        let out_dir = self.context.include_out_dir();

        let files = sync::scan(&include_dirs, sync::INCLUDE_PATTERN)?;
        for file in &files {
            let dest = sync::copy_flat(file, &out_dir)?;
            self.log.debug(&format!(
                "Copied include {} -> {}",
                paths::display_name(&include_dirs, file),
                dest.display()
            ));
        }
        report.includes_synced = files.len();
        if !files.is_empty() {
            self.log.info(&format!("Synced {} include file(s)", files.len()));
        }
        Ok(())
    }

    /// Compile every matched script, in scan order.
    fn build_all_scripts(&self, report: &mut BuildReport) -> Result<(), BuildError> {
        let script_dirs = self.context.script_dirs();
        let sources = sync::scan(&script_dirs, sync::SCRIPT_PATTERN)?;

        if sources.is_empty() {
            self.log.warning("No script sources found");
            return Ok(());
        }

        // Invariant: script i+1 starts only after script i completes.
        // One compiler subprocess at a time keeps diagnostics readable and
        // their order deterministic.
        for source in &sources {
            let result = self.build_script(source)?;
            let failed = !result.is_success();
            report.add_script(result);

            if failed && !self.options.ignore_errors {
                report.mark_aborted();
                return Ok(());
            }
        }
        Ok(())
    }

    /// Copy-then-compile a single script.
    ///
    /// Copies the raw source into the scripts output directory when one is
    /// configured, compiles it into the plugins directory, and routes every
    /// diagnostic to the log at its classified severity.
    pub fn build_script(&self, source: &Path) -> Result<ScriptResult, BuildError> {
        let script_dirs = self.context.script_dirs();
        let display = paths::display_name(&script_dirs, source);

        if let Some(scripts_out) = self.context.scripts_out_dir() {
            sync::copy_flat(source, &scripts_out)?;
            self.log.debug(&format!("Copied script {} -> {}", display, scripts_out.display()));
        }

        let dest_dir = self.plugin_dest_dir(source)?;
        self.log.info(&format!("Compiling {}", display));

        let start = Instant::now();
        let result = self.compiler.compile(source, &dest_dir)?;
        let duration = start.elapsed();

        self.log_diagnostics(&result, &display);

        if result.success {
            let artifact = result.artifact.unwrap_or_default();
            self.log.success(&format!("Compiled {} -> {}", display, artifact));
            Ok(ScriptResult::compiled(source.to_path_buf(), artifact, duration))
        } else {
            let error = result.error.unwrap_or_else(|| "compile failed".to_string());
            self.log.error(&format!("Failed {}: {}", display, error));
            Ok(ScriptResult::failed(source.to_path_buf(), error, duration))
        }
    }

    /// Copy a single include file into the include output directory.
    pub fn sync_include(&self, source: &Path) -> Result<PathBuf, BuildError> {
        let dest = sync::copy_flat(source, &self.context.include_out_dir())?;
        self.log.info(&format!(
            "Copied include {} -> {}",
            paths::display_name(&self.context.include_dirs(), source),
            dest.display()
        ));
        Ok(dest)
    }

    /// Copy a single asset into the assets output directory, preserving its
    /// input-relative path. Returns `None` when assets are not configured.
    pub fn sync_asset(&self, source: &Path) -> Result<Option<PathBuf>, BuildError> {
        let (Some(asset_dirs), Some(out_dir)) =
            (self.context.asset_dirs(), self.context.assets_out_dir())
        else {
            return Ok(None);
        };

        let dest = sync::copy_relative(source, &asset_dirs, &out_dir)?;
        self.log.info(&format!(
            "Copied asset {} -> {}",
            paths::display_name(&asset_dirs, source),
            dest.display()
        ));
        Ok(Some(dest))
    }

    /// Destination directory for a script's compiled plugin: the plugins
    /// directory itself under flat compilation, the mirrored source
    /// sub-directory otherwise.
    fn plugin_dest_dir(&self, source: &Path) -> Result<PathBuf, BuildError> {
        let plugins = self.context.plugins_dir();
        if self.context.flat_compilation() {
            return Ok(plugins);
        }

        let rel = paths::resolve_relative(&self.context.script_dirs(), source)
            .map_err(SyncError::Path)?;
        match rel.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => Ok(plugins.join(parent)),
            _ => Ok(plugins),
        }
    }

    fn log_diagnostics(&self, result: &CompileResult, display_file: &str) {
        for message in &result.messages {
            let text = message.render(display_file);
            match message.severity {
                Severity::FatalError | Severity::Error => self.log.error(&text),
                Severity::Warning => self.log.warning(&text),
                Severity::Echo => self.log.debug(&text),
            }
        }
    }
}
