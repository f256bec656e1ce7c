//! Diagnostic severity levels ordered from least to most severe.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The severity level of a compiler diagnostic.
///
/// Ordered from least severe (`Note`) to most severe (`Error`), matching the
/// derived `PartialOrd`/`Ord` implementation based on declaration order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational output that is neither a warning nor an error.
    Note,
    /// A potential issue that doesn't prevent compilation.
    Warning,
    /// A problem that prevented the compiler from producing output.
    Error,
}

impl Severity {
    /// Classifies a compiler message by the severity tag it carries.
    ///
    /// solc prefixes the message body with `Error:`, `ParserError:`,
    /// `TypeError:` and so on for errors, and `Warning:` for warnings.
    pub fn classify(message: &str) -> Self {
        let head = message.lines().next().unwrap_or_default();
        if head.contains("Warning:") {
            Severity::Warning
        } else if head.contains("Error:") || head.contains("Error ") {
            Severity::Error
        } else {
            Severity::Note
        }
    }

    /// Returns `true` if this severity is [`Error`](Severity::Error).
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Note => write!(f, "note"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}
