//! Build context containing configuration and state for a build.

use crate::config::AmxConfig;
use std::path::{Path, PathBuf};

/// Build context holding the loaded configuration and project root.
///
/// Resolves every configured directory against the project root and exposes
/// the input/output sets the orchestrators work with. Loaded once per run
/// and read-only afterwards.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// The loaded configuration
    config: AmxConfig,
    /// Project root directory (where amxbuild.toml is located)
    project_root: PathBuf,
    /// Whether to run in verbose mode
    verbose: bool,
}

impl BuildContext {
    /// Create a new build context.
    pub fn new(config: AmxConfig, project_root: PathBuf) -> Self {
        Self { config, project_root, verbose: false }
    }

    /// Get the configuration.
    pub fn config(&self) -> &AmxConfig {
        &self.config
    }

    /// Get the project root directory.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Whether verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Set verbose mode.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Resolve a path relative to the project root.
    ///
    /// If the path is absolute, returns it unchanged.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }

    /// Script input directories (resolved).
    pub fn script_dirs(&self) -> Vec<PathBuf> {
        self.config.input.scripts.iter().map(|p| self.resolve_path(p)).collect()
    }

    /// Include input directories (resolved).
    pub fn include_dirs(&self) -> Vec<PathBuf> {
        self.config.input.include.iter().map(|p| self.resolve_path(p)).collect()
    }

    /// Asset input directories (resolved), when the project ships assets.
    pub fn asset_dirs(&self) -> Option<Vec<PathBuf>> {
        self.config
            .input
            .assets
            .as_ref()
            .map(|dirs| dirs.iter().map(|p| self.resolve_path(p)).collect())
    }

    /// Plugins output directory (resolved).
    pub fn plugins_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.output.plugins)
    }

    /// Raw-script output directory (resolved), when configured.
    pub fn scripts_out_dir(&self) -> Option<PathBuf> {
        self.config.output.scripts.as_ref().map(|p| self.resolve_path(p))
    }

    /// Include output directory (resolved).
    pub fn include_out_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.output.include)
    }

    /// Assets output directory (resolved), when configured.
    pub fn assets_out_dir(&self) -> Option<PathBuf> {
        self.config.output.assets.as_ref().map(|p| self.resolve_path(p))
    }

    /// Full path of the compiler executable (resolved).
    pub fn compiler_executable(&self) -> PathBuf {
        self.resolve_path(&self.config.compiler.executable_path())
    }

    /// Include search path in compiler order: the compiler's bundled
    /// include directory, then the extra configured directories, then the
    /// input include directories.
    pub fn include_search_path(&self) -> Vec<PathBuf> {
        let mut dirs = vec![self.resolve_path(&self.config.compiler.bundled_include_dir())];
        for dir in &self.config.rules.include {
            dirs.push(self.resolve_path(dir));
        }
        dirs.extend(self.include_dirs());
        dirs
    }

    /// Whether compiled plugins are placed flat in the plugins directory.
    pub fn flat_compilation(&self) -> bool {
        self.config.rules.flat_compilation
    }
}
