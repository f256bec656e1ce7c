//! The version -> compiler binary table.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Patch releases of the 0.4 series shipped in the default table.
///
/// Starts at 0.4.11, the first release that accepts `--standard-json`.
const BUILTIN_PATCHES: std::ops::RangeInclusive<u32> = 11..=26;

/// An immutable mapping from Solidity version to compiler binary.
///
/// Built once before compiling and shared by every compile task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerTable {
    binaries: BTreeMap<String, PathBuf>,
}

impl CompilerTable {
    /// The default table: `0.4.N` maps to `<compilers_dir>/solc-v0.4.N` for
    /// N from 11 through 26.
    pub fn builtin(compilers_dir: &Path) -> Self {
        let binaries = BUILTIN_PATCHES
            .map(|patch| {
                let version = format!("0.4.{patch}");
                let binary = compilers_dir.join(format!("solc-v{version}"));
                (version, binary)
            })
            .collect();
        Self { binaries }
    }

    /// Returns a table with `overrides` layered on top.
    ///
    /// Relative binary paths are taken relative to `compilers_dir`.
    pub fn with_overrides(
        mut self,
        overrides: &BTreeMap<String, String>,
        compilers_dir: &Path,
    ) -> Self {
        for (version, binary) in overrides {
            let binary = Path::new(binary);
            let path = if binary.is_absolute() {
                binary.to_path_buf()
            } else {
                compilers_dir.join(binary)
            };
            self.binaries.insert(version.clone(), path);
        }
        self
    }

    /// Looks up the binary for an exact version.
    pub fn resolve(&self, version: &str) -> Option<&Path> {
        self.binaries.get(version).map(PathBuf::as_path)
    }
}
