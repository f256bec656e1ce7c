//! Reading and writing `<Contract>.json` artifact files.

use std::path::PathBuf;

use serde::Serialize;

use crate::artifact::ContractArtifact;
use crate::error::ArtifactError;

/// File extension of artifact files.
const ARTIFACT_EXT: &str = "json";

/// Indentation used when pretty-printing artifacts.
const JSON_INDENT: &[u8] = b"    ";

/// Directory of artifact files, one per contract.
///
/// Each artifact lives at `<artifacts_dir>/<contract_name>.json`. The store
/// performs no locking: callers must not write the same contract's file from
/// two tasks at once.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    artifacts_dir: PathBuf,
}

impl ArtifactStore {
    /// Creates a store rooted at the given artifacts directory.
    pub fn new(artifacts_dir: impl Into<PathBuf>) -> Self {
        Self {
            artifacts_dir: artifacts_dir.into(),
        }
    }

    /// Returns the file path of a contract's artifact.
    pub fn artifact_path(&self, contract_name: &str) -> PathBuf {
        self.artifacts_dir
            .join(format!("{contract_name}.{ARTIFACT_EXT}"))
    }

    /// Creates the artifacts directory if it does not exist.
    pub async fn ensure_dir(&self) -> Result<(), ArtifactError> {
        if tokio::fs::try_exists(&self.artifacts_dir)
            .await
            .unwrap_or(false)
        {
            return Ok(());
        }
        tracing::info!("Creating artifacts directory...");
        tokio::fs::create_dir_all(&self.artifacts_dir)
            .await
            .map_err(|e| ArtifactError::Io {
                path: self.artifacts_dir.clone(),
                source: e,
            })
    }

    /// Loads a contract's artifact for the compile path.
    ///
    /// Returns `None` if the file is missing or does not parse. This is
    /// fail-safe: a corrupt artifact is treated as absent, which forces a
    /// recompile that overwrites it.
    pub async fn load(&self, contract_name: &str) -> Option<ContractArtifact> {
        let path = self.artifact_path(contract_name);
        let content = tokio::fs::read_to_string(&path).await.ok()?;
        match serde_json::from_str(&content) {
            Ok(artifact) => Some(artifact),
            Err(e) => {
                tracing::debug!("ignoring unparseable artifact {}: {e}", path.display());
                None
            }
        }
    }

    /// Loads a contract's artifact for the deploy path.
    ///
    /// Unlike [`load`](Self::load), a missing or unparseable file is an
    /// [`ArtifactError::MissingArtifact`].
    pub async fn load_for_deploy(
        &self,
        contract_name: &str,
    ) -> Result<ContractArtifact, ArtifactError> {
        let path = self.artifact_path(contract_name);
        let missing = |reason: String| ArtifactError::MissingArtifact {
            contract: contract_name.to_string(),
            path: path.clone(),
            reason,
        };
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| missing(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| missing(e.to_string()))
    }

    /// Writes an artifact, fully replacing the contract's file.
    pub async fn save(&self, artifact: &ContractArtifact) -> Result<PathBuf, ArtifactError> {
        let path = self.artifact_path(&artifact.contract_name);
        let content = to_pretty_json(artifact)?;
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| ArtifactError::Io {
                path: path.clone(),
                source: e,
            })?;
        Ok(path)
    }
}

/// Serializes an artifact with four-space indentation.
pub fn to_pretty_json(artifact: &ContractArtifact) -> Result<String, ArtifactError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    artifact
        .serialize(&mut ser)
        .map_err(|e| ArtifactError::Serialization {
            reason: e.to_string(),
        })?;
    String::from_utf8(buf).map_err(|e| ArtifactError::Serialization {
        reason: e.to_string(),
    })
}
