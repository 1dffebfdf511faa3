//! `CompilerError` sink: accumulates diagnostics across a compilation
//! rather than aborting on the first one.
//!
//! Every producer crate (`glyph-lexer`, `glyph-syntax`, `glyph-check`) knows
//! how to format its own error variants into a message string; this crate
//! only owns the accumulation and severity taxonomy, mirroring
//! `EmojicodeCompiler::CompilerError` plus `Application::warn`/`error`.

use serde::Serialize;
use std::fmt;

use crate::position::SourcePosition;

/// The seven user-visible error categories. Kept as a flat
/// tag here (rather than nesting each crate's full error enum) so this crate
/// does not need to depend on every producer crate; producers attach the
/// category when they push a diagnostic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ErrorCategory {
    Lex,
    Parse,
    Type,
    Scope,
    Init,
    Package,
    Access,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCategory::Lex => "LexError",
            ErrorCategory::Parse => "ParseError",
            ErrorCategory::Type => "TypeError",
            ErrorCategory::Scope => "ScopeError",
            ErrorCategory::Init => "InitError",
            ErrorCategory::Package => "PackageError",
            ErrorCategory::Access => "AccessError",
        };
        write!(f, "{s}")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    Warning,
}

/// One recorded diagnostic: a category, a position, and a human message.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub category: ErrorCategory,
    pub position: SourcePosition,
    pub message: String,
}

impl Diagnostic {
    pub fn error(category: ErrorCategory, position: SourcePosition, message: impl Into<String>) -> Self {
        Diagnostic { severity: Severity::Error, category, position, message: message.into() }
    }

    pub fn warning(category: ErrorCategory, position: SourcePosition, message: impl Into<String>) -> Self {
        Diagnostic { severity: Severity::Warning, category, position, message: message.into() }
    }

    /// `🚨 line L col C <path>: <message>`, the human-readable form.
    pub fn render_human(&self, file_path: &str) -> String {
        format!("🚨 line {} col {} {}: {}", self.position.line, self.position.character, file_path, self.message)
    }

    /// `{ "type": "error"|"warning", "line": L, "character": C, "file": "...", "message": "..." }`.
    pub fn render_json(&self, file_path: &str) -> serde_json::Value {
        serde_json::json!({
            "type": match self.severity { Severity::Error => "error", Severity::Warning => "warning" },
            "line": self.position.line,
            "character": self.position.character,
            "file": file_path,
            "message": self.message,
        })
    }
}

/// Accumulates diagnostics across an entire compilation. The analysis-queue
/// drain loop pushes one diagnostic per caught per-function error
/// instead of aborting; package-level failures (e.g. circular import) are
/// pushed the same way before the whole compilation short-circuits.
#[derive(Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity == Severity::Error {
            tracing::warn!(category = %diagnostic.category, message = %diagnostic.message, "diagnostic recorded");
        } else {
            tracing::debug!(category = %diagnostic.category, message = %diagnostic.message, "warning recorded");
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::FileTable;

    fn pos() -> SourcePosition {
        let table = FileTable::new();
        SourcePosition::new(3, 7, table.intern("a.glyph"))
    }

    #[test]
    fn sink_tracks_error_presence() {
        let mut sink = DiagnosticSink::new();
        assert!(!sink.has_errors());
        sink.push(Diagnostic::warning(ErrorCategory::Type, pos(), "unused"));
        assert!(!sink.has_errors());
        sink.push(Diagnostic::error(ErrorCategory::Scope, pos(), "not found"));
        assert!(sink.has_errors());
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn human_render_matches_expected_format() {
        let d = Diagnostic::error(ErrorCategory::Type, pos(), "incompatible types");
        assert_eq!(d.render_human("a.glyph"), "🚨 line 3 col 7 a.glyph: incompatible types");
    }
}
