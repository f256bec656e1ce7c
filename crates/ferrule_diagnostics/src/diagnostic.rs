//! Normalized compiler diagnostics.

use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// A compiler message whose embedded source path has been reduced to a base
/// file name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompilerDiagnostic {
    /// Severity classified from the message text.
    pub severity: Severity,
    /// The normalized message.
    pub message: String,
}

impl CompilerDiagnostic {
    /// Normalizes a raw compiler message and classifies its severity.
    pub fn from_raw(raw: &str) -> Self {
        let message = normalize_message(raw);
        Self {
            severity: Severity::classify(&message),
            message,
        }
    }
}

/// Replaces the source path in a compiler message with its base name.
///
/// `base/Token.sol:6:46: Warning: Unused local variable` becomes
/// `Token.sol:6:46: Warning: Unused local variable`. The path is the first
/// whitespace-delimited token ending in `.sol` on the first line that
/// mentions one, which also covers the ` --> base/Token.sol:6:46:` location
/// line of newer compilers. Quotes around the path are kept. A message
/// without a path is returned unchanged.
pub fn normalize_message(raw: &str) -> String {
    let Some(line) = raw.lines().find(|l| l.contains(".sol")) else {
        return raw.to_string();
    };
    let Some(idx) = line.find(".sol") else {
        return raw.to_string();
    };
    let end = idx + ".sol".len();
    let start = line[..idx]
        .rfind(char::is_whitespace)
        .map_or(0, |ws| ws + 1);
    let path = line[start..end].trim_start_matches(['"', '\'']);
    let base = path.rsplit(['/', '\\']).next().unwrap_or(path);
    if base == path {
        return raw.to_string();
    }
    raw.replacen(path, base, 1)
}
