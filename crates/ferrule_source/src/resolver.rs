//! Best-effort recursive discovery of Solidity sources.
//!
//! Every directory entry produces an [`EntryOutcome`]: either a loaded source
//! or a skip with its reason. Only an unreadable root aborts the walk.

use std::path::{Path, PathBuf};

use crate::error::SourceError;
use crate::source_set::{SourceFile, SourceSet};

/// File extension of contract sources.
pub const SOURCE_EXTENSION: &str = "sol";

/// Why a directory entry was not loaded.
#[derive(Debug)]
pub enum SkipReason {
    /// A `.sol` file that could not be read as UTF-8 text.
    Unreadable(std::io::Error),
    /// Neither a `.sol` file nor a listable directory.
    NotSourceOrDirectory(std::io::Error),
}

/// The result of visiting one directory entry.
#[derive(Debug)]
pub enum EntryOutcome {
    /// A source file was read.
    Loaded {
        /// Base file name, the key in the [`SourceSet`].
        name: String,
        /// The loaded file.
        file: SourceFile,
    },
    /// The entry was skipped.
    Skipped {
        /// Path of the skipped entry.
        path: PathBuf,
        /// Why it was skipped.
        reason: SkipReason,
    },
}

/// Walks `root` recursively and returns one outcome per visited entry.
///
/// Entries are visited in sorted order within each directory so that
/// base-name collisions resolve deterministically (last visited wins).
pub fn walk_sources(root: &Path) -> Result<Vec<EntryOutcome>, SourceError> {
    let entries = list_dir(root).map_err(|e| SourceError::RootUnreadable {
        path: root.to_path_buf(),
        source: e,
    })?;
    let mut outcomes = Vec::new();
    for path in entries {
        visit(&path, &mut outcomes);
    }
    Ok(outcomes)
}

/// Discovers all sources under `root` and collects them into a [`SourceSet`].
///
/// Skipped entries are logged as warnings. Duplicate base names are logged
/// and the later file replaces the earlier one.
pub fn resolve_sources(root: &Path) -> Result<SourceSet, SourceError> {
    let mut set = SourceSet::new();
    for outcome in walk_sources(root)? {
        match outcome {
            EntryOutcome::Loaded { name, file } => {
                tracing::info!("Reading {name} source...");
                let path = file.path.clone();
                if let Some(previous) = set.insert(name.clone(), file) {
                    tracing::warn!(
                        "{} shadows {} (both are named {name})",
                        path.display(),
                        previous.path.display()
                    );
                }
            }
            EntryOutcome::Skipped { path, reason } => match reason {
                SkipReason::Unreadable(e) => {
                    tracing::warn!("Could not read file at {}: {e}", path.display());
                }
                SkipReason::NotSourceOrDirectory(_) => {
                    tracing::warn!(
                        "{} is not a directory or .{SOURCE_EXTENSION} file",
                        path.display()
                    );
                }
            },
        }
    }
    Ok(set)
}

/// Visits a single entry, recursing into subdirectories.
fn visit(path: &Path, outcomes: &mut Vec<EntryOutcome>) {
    if path.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXTENSION) {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        match std::fs::read_to_string(path) {
            Ok(content) => outcomes.push(EntryOutcome::Loaded {
                name,
                file: SourceFile {
                    path: path.to_path_buf(),
                    content,
                },
            }),
            Err(e) => outcomes.push(EntryOutcome::Skipped {
                path: path.to_path_buf(),
                reason: SkipReason::Unreadable(e),
            }),
        }
        return;
    }

    match list_dir(path) {
        Ok(children) => {
            for child in children {
                visit(&child, outcomes);
            }
        }
        Err(e) => outcomes.push(EntryOutcome::Skipped {
            path: path.to_path_buf(),
            reason: SkipReason::NotSourceOrDirectory(e),
        }),
    }
}

/// Lists a directory's entries as sorted paths.
fn list_dir(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut paths = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();
    Ok(paths)
}
