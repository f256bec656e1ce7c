//! Error types for source discovery.

use std::path::PathBuf;

/// Errors that abort source discovery.
///
/// Only the root directory is load-bearing: unreadable entries below it are
/// reported as skipped rather than as errors.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The contracts root directory could not be listed.
    #[error("no directory found at {path}: {source}")]
    RootUnreadable {
        /// The root directory that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
