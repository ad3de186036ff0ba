//! Diagnostics produced by every pipeline stage, and the reporter that orders
//! and prints them.

use std::fmt;
use std::path::{Path, PathBuf};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// The pipeline stage that raised a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum DiagnosticKind {
    Io,
    Lex,
    Parse,
    Semantic,
}

/// A single located message.
///
/// `line` and `column` are 1-based. A diagnostic about a whole file (an
/// unreadable or empty file, for instance) uses `0` for both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
}

impl Diagnostic {
    pub fn error(
        kind: DiagnosticKind,
        file: impl Into<PathBuf>,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            message: message.into(),
            file: file.into(),
            line,
            column,
        }
    }

    pub fn warning(
        kind: DiagnosticKind,
        file: impl Into<PathBuf>,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(kind, file, line, column, message)
        }
    }

    /// A diagnostic that concerns a whole file rather than a position in it.
    pub fn for_file(
        severity: Severity,
        kind: DiagnosticKind,
        file: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
            file: file.into(),
            line: 0,
            column: 0,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// `file:line:column` (or just `file` for whole-file diagnostics).
    pub fn location(&self) -> String {
        format_location(&self.file, self.line, self.column)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.location(), self.severity, self.message)
    }
}

pub(crate) fn format_location(file: &Path, line: usize, column: usize) -> String {
    if line == 0 {
        file.display().to_string()
    } else {
        format!("{}:{}:{}", file.display(), line, column)
    }
}

/// Outcome of a run, mapped onto the process exit code by the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// No error diagnostics (warnings allowed).
    Success,
    /// At least one error diagnostic in some input file.
    Errors,
    /// The run was aborted by an environment problem.
    Fatal,
}

impl RunStatus {
    pub fn code(self) -> u8 {
        match self {
            RunStatus::Success => 0,
            RunStatus::Errors => 1,
            RunStatus::Fatal => 2,
        }
    }
}

/// Collects the diagnostics of a whole run.
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    diagnostics: Vec<Diagnostic>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::trace!(%diagnostic, "diagnostic recorded");
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.push(diagnostic);
        }
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| !d.is_error()).count()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics ordered by (file, line, column). The sort is stable, so
    /// diagnostics at the same position keep the order they were raised in.
    pub fn sorted(&self) -> Vec<&Diagnostic> {
        let mut sorted: Vec<&Diagnostic> = self.diagnostics.iter().collect();
        sorted.sort_by(|a, b| (&a.file, a.line, a.column).cmp(&(&b.file, b.line, b.column)));
        sorted
    }

    pub fn status(&self) -> RunStatus {
        if self.has_errors() {
            RunStatus::Errors
        } else {
            RunStatus::Success
        }
    }

    /// `2 errors, 1 warning`
    pub fn summary(&self) -> String {
        format!(
            "{}, {}",
            plural(self.error_count(), "error"),
            plural(self.warning_count(), "warning")
        )
    }

    /// The printable report: one line per diagnostic followed by the summary.
    /// With `include_warnings` set to false only errors are listed; the
    /// summary still counts both.
    pub fn render(&self, include_warnings: bool) -> String {
        let mut output = String::new();
        for diagnostic in self.sorted() {
            if diagnostic.is_error() || include_warnings {
                output.push_str(&diagnostic.to_string());
                output.push('\n');
            }
        }
        output.push_str(&self.summary());
        output.push('\n');
        output
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
