//! Build result types.
//!
//! Contains types for representing per-script outcomes and the aggregate
//! result of a batch build.

use std::path::PathBuf;
use std::time::Duration;

/// Status of a single script compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStatus {
    /// Compilation succeeded
    Compiled,
    /// Compilation failed with error text
    Failed(String),
}

impl ScriptStatus {
    /// Check if the status indicates success.
    pub fn is_success(&self) -> bool {
        matches!(self, ScriptStatus::Compiled)
    }
}

impl std::fmt::Display for ScriptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptStatus::Compiled => write!(f, "compiled"),
            ScriptStatus::Failed(err) => write!(f, "failed: {}", err),
        }
    }
}

/// Result of compiling a single script.
#[derive(Debug, Clone)]
pub struct ScriptResult {
    /// Source file that was compiled
    pub source: PathBuf,
    /// Compile status
    pub status: ScriptStatus,
    /// Artifact file name, when compiled
    pub artifact: Option<String>,
    /// Compile duration
    pub duration: Duration,
}

impl ScriptResult {
    /// Create a successful result.
    pub fn compiled(source: PathBuf, artifact: String, duration: Duration) -> Self {
        Self { source, status: ScriptStatus::Compiled, artifact: Some(artifact), duration }
    }

    /// Create a failed result.
    pub fn failed(source: PathBuf, error: String, duration: Duration) -> Self {
        Self { source, status: ScriptStatus::Failed(error), artifact: None, duration }
    }

    /// Check if this result is successful.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Terminal state of a whole batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Every script compiled
    Succeeded,
    /// At least one script failed but the batch ran to completion
    FinishedWithErrors,
    /// A failure stopped the batch before the remaining scripts ran
    Aborted,
}

impl std::fmt::Display for BatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchOutcome::Succeeded => write!(f, "succeeded"),
            BatchOutcome::FinishedWithErrors => write!(f, "finished with errors"),
            BatchOutcome::Aborted => write!(f, "aborted"),
        }
    }
}

/// Result of a complete build run.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Results for each script, in processing order
    pub scripts: Vec<ScriptResult>,
    /// Number of include files copied
    pub includes_synced: usize,
    /// Number of asset files copied
    pub assets_synced: usize,
    /// Total build duration
    pub total_duration: Duration,
    aborted: bool,
}

impl BuildReport {
    /// Create a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a script result.
    pub fn add_script(&mut self, result: ScriptResult) {
        self.scripts.push(result);
    }

    /// Mark the batch as aborted before completion.
    pub fn mark_aborted(&mut self) {
        self.aborted = true;
    }

    /// Number of scripts that compiled.
    pub fn compiled_count(&self) -> usize {
        self.scripts.iter().filter(|r| r.is_success()).count()
    }

    /// Number of scripts that failed.
    pub fn failed_count(&self) -> usize {
        self.scripts.iter().filter(|r| !r.is_success()).count()
    }

    /// Failed script results.
    pub fn failures(&self) -> Vec<&ScriptResult> {
        self.scripts.iter().filter(|r| !r.is_success()).collect()
    }

    /// Aggregate success: true iff every compile in the batch succeeded
    /// and the batch ran to completion.
    ///
    /// Reflects per-script failures even when the error-tolerance policy
    /// let the batch continue.
    pub fn is_success(&self) -> bool {
        !self.aborted && self.failed_count() == 0
    }

    /// Fold the batch into its terminal state.
    pub fn outcome(&self) -> BatchOutcome {
        if self.aborted {
            BatchOutcome::Aborted
        } else if self.failed_count() > 0 {
            BatchOutcome::FinishedWithErrors
        } else {
            BatchOutcome::Succeeded
        }
    }

    /// Format a one-line summary of the batch.
    pub fn summary(&self) -> String {
        let compiled = self.compiled_count();
        let failed = self.failed_count();
        let total = self.scripts.len();

        if failed > 0 || self.aborted {
            format!(
                "{} compiled, {} failed ({} total) in {:.2}s",
                compiled,
                failed,
                total,
                self.total_duration.as_secs_f64()
            )
        } else {
            format!("{} compiled in {:.2}s", compiled, self.total_duration.as_secs_f64())
        }
    }
}
