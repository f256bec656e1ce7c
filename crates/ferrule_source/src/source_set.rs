//! The set of discovered sources, keyed by file base name.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A single loaded source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Where the file was read from.
    pub path: PathBuf,
    /// The raw source text.
    pub content: String,
}

/// The answer to an import lookup.
///
/// `contents` is `None` when no source with the requested base name was
/// discovered. The compiler is responsible for reporting that as its own
/// error; the lookup itself never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportContents {
    /// Source text of the imported file, if known.
    pub contents: Option<String>,
}

/// All Solidity sources found under a contracts directory.
///
/// Keys are base file names (`Token.sol`), so two files with the same name in
/// different directories collide; the resolver keeps the last one visited.
#[derive(Debug, Clone, Default)]
pub struct SourceSet {
    files: BTreeMap<String, SourceFile>,
}

impl SourceSet {
    /// Creates an empty source set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a source under `name`, returning the file it replaced.
    pub fn insert(&mut self, name: impl Into<String>, file: SourceFile) -> Option<SourceFile> {
        self.files.insert(name.into(), file)
    }

    /// Adds an in-memory source (useful for tests).
    pub fn add_source(&mut self, name: impl Into<String>, content: impl Into<String>) {
        let name = name.into();
        let file = SourceFile {
            path: PathBuf::from(&name),
            content: content.into(),
        };
        self.files.insert(name, file);
    }

    /// Returns the source stored under the given base name.
    pub fn get(&self, name: &str) -> Option<&SourceFile> {
        self.files.get(name)
    }

    /// Iterates over all base names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Iterates over `(base name, file)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SourceFile)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of sources in the set.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if no sources were discovered.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Resolves an import path to the source with the same base name.
    ///
    /// `import "./lib/SafeMath.sol"` and `import "SafeMath.sol"` both resolve
    /// to the discovered `SafeMath.sol`, wherever it lives.
    pub fn find_import(&self, import_path: &str) -> ImportContents {
        ImportContents {
            contents: self
                .files
                .get(base_name(import_path))
                .map(|f| f.content.clone()),
        }
    }
}

/// Returns the final path component of a `/`- or `\`-separated path.
pub fn base_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.rsplit('\\').next().unwrap_or(n))
        .unwrap_or(path)
}
