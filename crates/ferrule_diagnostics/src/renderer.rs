//! Diagnostic rendering backends for human-readable and machine-readable output.

use crate::diagnostic::CompilerDiagnostic;
use crate::severity::Severity;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders all diagnostics of a run into one string.
    fn render_all(&self, diagnostics: &[CompilerDiagnostic]) -> String;
}

/// Renders diagnostics as plain terminal text, one message per block.
///
/// The compiler's own message already carries its location and severity tag,
/// so the message is printed verbatim; with `color` enabled the first line is
/// tinted by severity.
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn render(&self, diag: &CompilerDiagnostic) -> String {
        let message = diag.message.trim_end();
        if !self.color {
            return format!("{message}\n");
        }
        let code = match diag.severity {
            Severity::Error => "31",
            Severity::Warning => "33",
            Severity::Note => "36",
        };
        let (head, rest) = message.split_once('\n').unwrap_or((message, ""));
        if rest.is_empty() {
            format!("\x1b[{code}m{head}\x1b[0m\n")
        } else {
            format!("\x1b[{code}m{head}\x1b[0m\n{rest}\n")
        }
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render_all(&self, diagnostics: &[CompilerDiagnostic]) -> String {
        diagnostics.iter().map(|d| self.render(d)).collect()
    }
}

/// Renders diagnostics as a pretty-printed JSON array.
pub struct JsonRenderer;

impl DiagnosticRenderer for JsonRenderer {
    fn render_all(&self, diagnostics: &[CompilerDiagnostic]) -> String {
        serde_json::to_string_pretty(diagnostics).unwrap_or_else(|_| "[]".to_string())
    }
}
