//! Leveled log sink for build and watch output.
//!
//! The pipeline never prints directly; it talks to a [`BuildLog`] passed in
//! at construction, so command handlers control presentation and tests can
//! capture output with [`MemoryLog`].

use std::sync::Mutex;

/// ANSI escape sequence to reset all formatting
const ANSI_RESET: &str = "\x1b[0m";
const ANSI_GREEN: &str = "\x1b[32m";
const ANSI_YELLOW: &str = "\x1b[33m";
const ANSI_RED: &str = "\x1b[31m";
const ANSI_DIM: &str = "\x1b[2m";

/// Log level for a single message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Progress and status messages
    Info,
    /// Successful completion of a step
    Success,
    /// Non-fatal problems
    Warning,
    /// Failures
    Error,
    /// Verbose-only detail (compiler echo lines, per-file copies)
    Debug,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Info => write!(f, "info"),
            LogLevel::Success => write!(f, "success"),
            LogLevel::Warning => write!(f, "warning"),
            LogLevel::Error => write!(f, "error"),
            LogLevel::Debug => write!(f, "debug"),
        }
    }
}

/// Leveled message sink used by the build and watch orchestrators.
///
/// Implementations only need the side effect of presenting the message;
/// callers never inspect a return value.
pub trait BuildLog {
    /// Progress and status messages
    fn info(&self, message: &str);
    /// Successful completion of a step
    fn success(&self, message: &str);
    /// Non-fatal problems
    fn warning(&self, message: &str);
    /// Failures
    fn error(&self, message: &str);
    /// Verbose-only detail
    fn debug(&self, message: &str);
}

/// Console sink writing info/success to stdout and warning/error to stderr.
pub struct ConsoleLog {
    color: bool,
    verbose: bool,
}

impl ConsoleLog {
    /// Create a console log with color auto-detected from the terminal.
    ///
    /// Color is disabled when stdout is not a tty or when the `NO_COLOR`
    /// environment variable is set.
    pub fn new() -> Self {
        let color = atty::is(atty::Stream::Stdout) && std::env::var_os("NO_COLOR").is_none();
        Self { color, verbose: false }
    }

    /// Enable or disable colored output.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Enable or disable debug messages.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn paint(&self, code: &str, message: &str) -> String {
        if self.color {
            format!("{}{}{}", code, message, ANSI_RESET)
        } else {
            message.to_string()
        }
    }
}

impl Default for ConsoleLog {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildLog for ConsoleLog {
    fn info(&self, message: &str) {
        println!("{}", message);
    }

    fn success(&self, message: &str) {
        println!("{}", self.paint(ANSI_GREEN, message));
    }

    fn warning(&self, message: &str) {
        eprintln!("{}", self.paint(ANSI_YELLOW, message));
    }

    fn error(&self, message: &str) {
        eprintln!("{}", self.paint(ANSI_RED, message));
    }

    fn debug(&self, message: &str) {
        if self.verbose {
            println!("{}", self.paint(ANSI_DIM, message));
        }
    }
}

/// In-memory sink that records every message with its level.
///
/// Used by tests to assert on routing and ordering.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLog {
    /// Create an empty memory log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded entries in emission order.
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries.lock().expect("log mutex poisoned").clone()
    }

    /// Messages recorded at the given level, in emission order.
    pub fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.entries.lock().expect("log mutex poisoned").push((level, message.to_string()));
    }
}

impl BuildLog for MemoryLog {
    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    fn success(&self, message: &str) {
        self.push(LogLevel::Success, message);
    }

    fn warning(&self, message: &str) {
        self.push(LogLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.push(LogLevel::Error, message);
    }

    fn debug(&self, message: &str) {
        self.push(LogLevel::Debug, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_log_records_in_order() {
        let log = MemoryLog::new();
        log.info("one");
        log.error("two");
        log.debug("three");

        let entries = log.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], (LogLevel::Info, "one".to_string()));
        assert_eq!(entries[1], (LogLevel::Error, "two".to_string()));
        assert_eq!(entries[2], (LogLevel::Debug, "three".to_string()));
    }

    #[test]
    fn test_memory_log_messages_at() {
        let log = MemoryLog::new();
        log.warning("w1");
        log.info("i1");
        log.warning("w2");

        assert_eq!(log.messages_at(LogLevel::Warning), vec!["w1", "w2"]);
        assert_eq!(log.messages_at(LogLevel::Error), Vec::<String>::new());
    }

    #[test]
    fn test_console_log_paint_disabled() {
        let log = ConsoleLog::new().with_color(false);
        assert_eq!(log.paint(ANSI_RED, "plain"), "plain");
    }

    #[test]
    fn test_console_log_paint_enabled() {
        let log = ConsoleLog::new().with_color(true);
        let painted = log.paint(ANSI_GREEN, "ok");
        assert!(painted.starts_with(ANSI_GREEN));
        assert!(painted.ends_with(ANSI_RESET));
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevel::Info.to_string(), "info");
        assert_eq!(LogLevel::Success.to_string(), "success");
        assert_eq!(LogLevel::Debug.to_string(), "debug");
    }
}
