//! Compiler diagnostic normalization, deduplication, and rendering.
//!
//! Raw compiler messages embed the path of the file they refer to. This crate
//! rewrites that path to its base name with [`normalize_message`] so that the
//! same warning reported from different working directories, or by several
//! compiles importing the same file, collapses into one entry in the
//! thread-safe [`DiagnosticSink`]. [`DiagnosticRenderer`] implementations
//! format the collected diagnostics once the run is over.

#![warn(missing_docs)]

pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use diagnostic::{normalize_message, CompilerDiagnostic};
pub use renderer::{DiagnosticRenderer, JsonRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
