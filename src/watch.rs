//! Watch mode for automatic rebuilds on file changes.
//!
//! Establishes debounced recursive watches over the scripts, include, and
//! assets input directories and re-runs the matching single-file action
//! whenever a file appears or changes. A failure for one file is logged and
//! isolated; the watch itself never terminates on a build failure.

use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::build::{BuildContext, BuildOptions, BuildPipeline};
use crate::compiler::ScriptCompiler;
use crate::logger::BuildLog;
use crate::sync::{is_include_file, is_script_file};

/// Error during watch mode
#[derive(Debug)]
pub enum WatchError {
    /// Failed to initialize file watcher
    WatcherInit(notify::Error),
    /// Failed to add watch path
    WatchPath(PathBuf, notify::Error),
    /// Channel receive error
    ChannelError(String),
    /// None of the configured input directories exist
    NoWatchRoots,
}

impl std::fmt::Display for WatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WatchError::WatcherInit(e) => write!(f, "Failed to initialize file watcher: {}", e),
            WatchError::WatchPath(path, e) => {
                write!(f, "Failed to watch path {}: {}", path.display(), e)
            }
            WatchError::ChannelError(msg) => write!(f, "Watch channel error: {}", msg),
            WatchError::NoWatchRoots => {
                write!(f, "No input directories exist; nothing to watch")
            }
        }
    }
}

impl std::error::Error for WatchError {}

/// What kind of input a changed file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputKind {
    Script,
    Include,
    Asset,
}

/// Clear the terminal screen
fn clear_screen() {
    // ANSI escape code to clear screen and move cursor to top-left
    print!("\x1B[2J\x1B[1;1H");
}

/// Get current timestamp for logging
fn timestamp() -> String {
    use std::time::SystemTime;
    let now = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
    let secs = now.as_secs() % 86400; // seconds since midnight
    let hours = (secs / 3600) % 24;
    let minutes = (secs / 60) % 60;
    let seconds = secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

fn is_under(dirs: &[PathBuf], path: &Path) -> bool {
    dirs.iter().any(|dir| path.starts_with(dir))
}

/// Classify a changed path against the configured input sets.
///
/// Checked in order: scripts, includes, assets. A `.sma` under the scripts
/// roots always triggers a compile even when directories overlap.
fn classify(context: &BuildContext, path: &Path) -> Option<InputKind> {
    if is_under(&context.script_dirs(), path) && is_script_file(path) {
        return Some(InputKind::Script);
    }
    if is_under(&context.include_dirs(), path) && is_include_file(path) {
        return Some(InputKind::Include);
    }
    if let Some(asset_dirs) = context.asset_dirs() {
        if context.assets_out_dir().is_some() && is_under(&asset_dirs, path) {
            return Some(InputKind::Asset);
        }
    }
    None
}

/// Watch the input directories and rebuild on change.
///
/// Runs one initial full build (errors tolerated), then blocks forever
/// dispatching debounced change events. Returns only on watcher setup
/// failure or channel disconnection.
pub fn watch_and_rebuild(
    context: &BuildContext,
    compiler: &dyn ScriptCompiler,
    log: &dyn BuildLog,
) -> Result<(), WatchError> {
    let watch_config = &context.config().watch;

    // Collect the roots that actually exist; watching a missing directory
    // is a notify error, and a project may legitimately have no assets.
    let mut roots = context.script_dirs();
    roots.extend(context.include_dirs());
    if let Some(asset_dirs) = context.asset_dirs() {
        roots.extend(asset_dirs);
    }
    roots.retain(|root| root.is_dir());
    if roots.is_empty() {
        return Err(WatchError::NoWatchRoots);
    }

    let (tx, rx) = channel();
    let debounce = Duration::from_millis(u64::from(watch_config.debounce_ms));
    let mut debouncer = new_debouncer(debounce, tx).map_err(WatchError::WatcherInit)?;

    for root in &roots {
        debouncer
            .watcher()
            .watch(root, RecursiveMode::Recursive)
            .map_err(|e| WatchError::WatchPath(root.clone(), e))?;
    }

    // Watch mode tolerates failing scripts: the batch reports them and
    // keeps going, and the watcher stays alive either way.
    let pipeline = BuildPipeline::new(context, compiler, log)
        .with_options(BuildOptions { ignore_errors: true });

    if watch_config.clear_screen {
        clear_screen();
    }
    log.info(&format!("[{}] Building...", timestamp()));
    if let Err(e) = pipeline.build() {
        log.error(&format!("[{}] Build error: {}", timestamp(), e));
    }
    log.info(&format!("[{}] Watching {} directories for changes...", timestamp(), roots.len()));

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let mut dispatched = false;
                for event in &events {
                    if !matches!(event.kind, DebouncedEventKind::Any) {
                        continue;
                    }
                    if !event.path.is_file() {
                        continue;
                    }
                    let Some(kind) = classify(context, &event.path) else {
                        continue;
                    };

                    if watch_config.clear_screen && !dispatched {
                        clear_screen();
                    }
                    dispatched = true;
                    dispatch(&pipeline, log, kind, &event.path);
                }
                if dispatched {
                    log.info(&format!(
                        "[{}] Watching {} directories for changes...",
                        timestamp(),
                        roots.len()
                    ));
                }
            }
            Ok(Err(error)) => {
                // Watcher hiccup (non-fatal) - log but continue watching
                log.error(&format!("[{}] Watch error: {:?}", timestamp(), error));
            }
            Err(e) => {
                return Err(WatchError::ChannelError(e.to_string()));
            }
        }
    }
}

/// Run the single-file action for one change event, isolating any failure
/// to this event.
fn dispatch(pipeline: &BuildPipeline<'_>, log: &dyn BuildLog, kind: InputKind, path: &Path) {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    log.info(&format!("[{}] Changed: {}", timestamp(), name));

    let outcome = match kind {
        InputKind::Script => pipeline.build_script(path).map(|_| ()),
        InputKind::Include => pipeline.sync_include(path).map(|_| ()),
        InputKind::Asset => pipeline.sync_asset(path).map(|_| ()),
    };

    if let Err(e) = outcome {
        log.error(&format!("[{}] Error handling {}: {}", timestamp(), name, e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_classify_script() {
        let temp = TempDir::new().unwrap();
        let ctx = BuildContext::new(default_config(), temp.path().to_path_buf());
        let script = temp.path().join("src/scripts/admin.sma");

        assert_eq!(classify(&ctx, &script), Some(InputKind::Script));
    }

    #[test]
    fn test_classify_non_script_extension_under_scripts() {
        let temp = TempDir::new().unwrap();
        let ctx = BuildContext::new(default_config(), temp.path().to_path_buf());
        let stray = temp.path().join("src/scripts/notes.txt");

        assert_eq!(classify(&ctx, &stray), None);
    }

    #[test]
    fn test_classify_include() {
        let temp = TempDir::new().unwrap();
        let ctx = BuildContext::new(default_config(), temp.path().to_path_buf());
        let include = temp.path().join("src/include/util.inc");

        assert_eq!(classify(&ctx, &include), Some(InputKind::Include));
    }

    #[test]
    fn test_classify_asset_requires_configuration() {
        let temp = TempDir::new().unwrap();
        let mut config = default_config();
        config.input.assets = Some(vec![std::path::PathBuf::from("assets")]);
        config.output.assets = Some(std::path::PathBuf::from("dist/assets"));
        let ctx = BuildContext::new(config, temp.path().to_path_buf());

        let asset = temp.path().join("assets/textures/foo.wad");
        assert_eq!(classify(&ctx, &asset), Some(InputKind::Asset));

        // Unconfigured assets never classify
        let bare = BuildContext::new(default_config(), temp.path().to_path_buf());
        assert_eq!(classify(&bare, &asset), None);
    }

    #[test]
    fn test_classify_outside_all_inputs() {
        let temp = TempDir::new().unwrap();
        let ctx = BuildContext::new(default_config(), temp.path().to_path_buf());

        assert_eq!(classify(&ctx, &temp.path().join("README.md")), None);
    }

    #[test]
    fn test_watch_without_roots_fails() {
        let temp = TempDir::new().unwrap();
        let ctx = BuildContext::new(default_config(), temp.path().join("empty"));
        let log = crate::logger::MemoryLog::new();

        struct NeverCompiler;
        impl ScriptCompiler for NeverCompiler {
            fn compile(
                &self,
                _source: &Path,
                _dest_dir: &Path,
            ) -> Result<crate::compiler::CompileResult, crate::compiler::CompileError>
            {
                unreachable!("watch setup fails before compiling");
            }
        }

        let result = watch_and_rebuild(&ctx, &NeverCompiler, &log);
        assert!(matches!(result, Err(WatchError::NoWatchRoots)));
    }

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp();
        assert_eq!(ts.len(), 8);
        assert_eq!(ts.chars().filter(|c| *c == ':').count(), 2);
    }

    #[test]
    fn test_is_under() {
        let dirs = vec![PathBuf::from("/a"), PathBuf::from("/b")];
        assert!(is_under(&dirs, Path::new("/b/file.sma")));
        assert!(!is_under(&dirs, Path::new("/c/file.sma")));
    }

    #[test]
    fn test_watch_error_display() {
        let err = WatchError::NoWatchRoots;
        assert!(err.to_string().contains("nothing to watch"));

        let err = WatchError::ChannelError("disconnected".to_string());
        assert!(err.to_string().contains("disconnected"));
    }
}
