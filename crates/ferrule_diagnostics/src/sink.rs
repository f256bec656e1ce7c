//! Thread-safe, deduplicating diagnostic accumulator for a compile run.

use crate::diagnostic::CompilerDiagnostic;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A deduplicating accumulator for compiler diagnostics.
///
/// One sink is shared by every compilation in a run. Raw messages are
/// normalized before insertion, and a normalized message is stored at most
/// once no matter how many files or concurrent compiles report it. Insertion
/// order of first occurrence is preserved for rendering.
pub struct DiagnosticSink {
    inner: Mutex<SinkInner>,
    error_count: AtomicUsize,
}

#[derive(Default)]
struct SinkInner {
    seen: HashSet<String>,
    diagnostics: Vec<CompilerDiagnostic>,
}

impl DiagnosticSink {
    /// Creates a new empty diagnostic sink.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(SinkInner::default()),
            error_count: AtomicUsize::new(0),
        }
    }

    /// Normalizes and records a raw compiler message.
    ///
    /// Returns `true` if the normalized message had not been seen before.
    pub fn emit(&self, raw: &str) -> bool {
        self.emit_diagnostic(CompilerDiagnostic::from_raw(raw))
    }

    /// Records an already normalized diagnostic.
    ///
    /// Returns `true` if the message had not been seen before.
    pub fn emit_diagnostic(&self, diag: CompilerDiagnostic) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if !inner.seen.insert(diag.message.clone()) {
            return false;
        }
        if diag.severity.is_error() {
            self.error_count.fetch_add(1, Ordering::Relaxed);
        }
        inner.diagnostics.push(diag);
        true
    }

    /// Returns the number of distinct error-severity diagnostics.
    ///
    /// Draining with [`take_all`](Self::take_all) does not reset the count.
    pub fn error_count(&self) -> usize {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Returns the number of distinct diagnostics recorded.
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .diagnostics
            .len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Takes all accumulated diagnostics, leaving the sink empty.
    ///
    /// The set of seen messages is kept, so a message taken here is still
    /// suppressed if it is emitted again.
    pub fn take_all(&self) -> Vec<CompilerDiagnostic> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut inner.diagnostics)
    }

    /// Returns a snapshot of all accumulated diagnostics without draining.
    pub fn diagnostics(&self) -> Vec<CompilerDiagnostic> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .diagnostics
            .clone()
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::Severity;

    #[test]
    fn empty_sink() {
        let sink = DiagnosticSink::new();
        assert_eq!(sink.error_count(), 0);
        assert!(sink.is_empty());
        assert!(sink.take_all().is_empty());
    }

    #[test]
    fn same_message_from_different_paths_is_recorded_once() {
        let sink = DiagnosticSink::new();
        assert!(sink.emit("base/Token.sol:6:46: Warning: Unused local variable"));
        assert!(!sink.emit("/abs/base/Token.sol:6:46: Warning: Unused local variable"));
        assert!(!sink.emit("Token.sol:6:46: Warning: Unused local variable"));
        assert_eq!(sink.len(), 1);
        assert_eq!(
            sink.diagnostics()[0].message,
            "Token.sol:6:46: Warning: Unused local variable"
        );
    }

    #[test]
    fn errors_are_counted_once() {
        let sink = DiagnosticSink::new();
        sink.emit("A.sol:1:1: TypeError: nope");
        sink.emit("x/A.sol:1:1: TypeError: nope");
        sink.emit("A.sol:2:1: Warning: meh");
        assert_eq!(sink.error_count(), 1);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn preserves_first_occurrence_order() {
        let sink = DiagnosticSink::new();
        sink.emit("B.sol:1:1: Warning: second file");
        sink.emit("A.sol:1:1: Warning: first file");
        let messages: Vec<_> = sink.diagnostics().into_iter().map(|d| d.message).collect();
        assert_eq!(
            messages,
            vec!["B.sol:1:1: Warning: second file", "A.sol:1:1: Warning: first file"]
        );
    }

    #[test]
    fn take_all_drains_but_still_deduplicates() {
        let sink = DiagnosticSink::new();
        sink.emit("A.sol:1:1: Warning: w");
        let all = sink.take_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].severity, Severity::Warning);
        assert!(sink.take_all().is_empty());
        assert!(!sink.emit("A.sol:1:1: Warning: w"));
    }

    #[test]
    fn error_count_survives_take_all() {
        let sink = DiagnosticSink::new();
        sink.emit("A.sol:1:1: ParserError: Expected pragma");
        assert_eq!(sink.take_all().len(), 1);
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let sink = Arc::new(DiagnosticSink::new());
        let mut handles = Vec::new();

        for t in 0..10 {
            let sink = Arc::clone(&sink);
            handles.push(thread::spawn(move || {
                for i in 0..100 {
                    sink.emit(&format!("dir{t}/Shared.sol:{i}:1: Warning: shared"));
                    sink.emit(&format!("Own{t}.sol:{i}:1: Error: own"));
                }
            }));
        }

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(sink.len(), 100 + 1000);
        assert_eq!(sink.error_count(), 1000);
    }

    #[tokio::test]
    async fn concurrent_tasks_interleave_without_loss() {
        use std::sync::Arc;

        let sink = Arc::new(DiagnosticSink::new());
        let mut set = tokio::task::JoinSet::new();
        for t in 0..8 {
            let sink = Arc::clone(&sink);
            set.spawn(async move {
                for i in 0..50 {
                    sink.emit(&format!("p{t}/Lib.sol:{i}:1: Warning: lib"));
                    tokio::task::yield_now().await;
                }
            });
        }
        while let Some(res) = set.join_next().await {
            res.unwrap();
        }
        assert_eq!(sink.len(), 50);
    }
}
