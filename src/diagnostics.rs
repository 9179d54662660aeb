//! Compiler diagnostic parsing and severity classification.
//!
//! The Pawn compiler reports diagnostics one per line in the shape
//! `file(line) : severity code: message`, with an optional `-- line` range
//! and an optional file/line prefix. Anything that does not match is kept
//! as an informational echo line (banner, "Done.", section headers).

use regex::Regex;
use std::sync::OnceLock;

/// Severity of a single compiler message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Compilation cannot continue
    FatalError,
    /// Compilation error
    Error,
    /// Suspicious but compilable construct
    Warning,
    /// Informational output echoed by the compiler
    Echo,
}

impl Severity {
    /// Whether this severity marks the compile as failed.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::FatalError | Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::FatalError => write!(f, "fatal error"),
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Echo => write!(f, "echo"),
        }
    }
}

/// One structured compiler message.
///
/// Immutable once parsed; one per emitted line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Classified severity
    pub severity: Severity,
    /// Compiler message code (e.g. "017"), absent on echo lines
    pub code: Option<String>,
    /// Free-text message
    pub message: String,
    /// Source file named by the compiler, if any
    pub file: Option<String>,
    /// 1-indexed line number, if any
    pub line: Option<u32>,
}

impl Diagnostic {
    /// Create an echo diagnostic from a raw output line.
    pub fn echo(text: &str) -> Self {
        Self {
            severity: Severity::Echo,
            code: None,
            message: text.to_string(),
            file: None,
            line: None,
        }
    }

    /// Source file for display, substituting `fallback` (the file being
    /// compiled) when the compiler named none.
    pub fn display_file<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.file.as_deref().unwrap_or(fallback)
    }

    /// Render the diagnostic the way it appears in build logs.
    pub fn render(&self, fallback_file: &str) -> String {
        let file = self.display_file(fallback_file);
        match (self.line, self.code.as_deref()) {
            (Some(line), Some(code)) => {
                format!("{}({}) : {} {}: {}", file, line, self.severity, code, self.message)
            }
            (None, Some(code)) => {
                format!("{} : {} {}: {}", file, self.severity, code, self.message)
            }
            _ => self.message.clone(),
        }
    }
}

fn diagnostic_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?:(.+?)\((\d+)(?:\s*--\s*\d+)?\)\s*:\s*)?(fatal error|error|warning)\s+(\d+)\s*:\s*(.*)$",
        )
        .expect("diagnostic pattern is valid")
    })
}

/// Parse a single compiler output line into a [`Diagnostic`].
///
/// Lines that do not carry a recognizable severity tag become echoes.
pub fn parse_line(line: &str) -> Diagnostic {
    let trimmed = line.trim_end();
    let Some(caps) = diagnostic_pattern().captures(trimmed) else {
        return Diagnostic::echo(trimmed);
    };

    let severity = match &caps[3] {
        "fatal error" => Severity::FatalError,
        "error" => Severity::Error,
        _ => Severity::Warning,
    };

    Diagnostic {
        severity,
        code: Some(caps[4].to_string()),
        message: caps[5].to_string(),
        file: caps.get(1).map(|m| m.as_str().trim().to_string()),
        line: caps.get(2).and_then(|m| m.as_str().parse().ok()),
    }
}

/// Parse complete compiler output into ordered diagnostics.
///
/// Blank lines are dropped; everything else is classified in emission order.
pub fn parse_output(output: &str) -> Vec<Diagnostic> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect()
}

/// Whether any diagnostic in the sequence marks the compile as failed.
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(|d| d.severity.is_error())
}
