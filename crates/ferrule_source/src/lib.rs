//! Discovery and in-memory storage of Solidity source files.
//!
//! [`resolve_sources`] walks a contracts directory and returns a
//! [`SourceSet`] keyed by file base name. The set also answers import
//! lookups for the compiler, which only ever sees base names.

#![warn(missing_docs)]

pub mod error;
pub mod resolver;
pub mod source_set;

pub use error::SourceError;
pub use resolver::{resolve_sources, walk_sources, EntryOutcome, SkipReason, SOURCE_EXTENSION};
pub use source_set::{base_name, ImportContents, SourceFile, SourceSet};
