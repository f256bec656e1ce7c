//! Project root discovery and layering CLI flags over `ferrule.toml`.

use std::path::{Path, PathBuf};

use alloy_primitives::Address;
use ferrule_common::NetworkId;
use ferrule_config::ProjectConfig;
use ferrule_deploy::TxDefaults;

use crate::{GlobalArgs, NodeArgs, PathArgs};

/// The loaded configuration and the directory its paths are relative to.
#[derive(Debug)]
pub struct ProjectSettings {
    /// Project root.
    pub root: PathBuf,
    /// Configuration with CLI overrides applied.
    pub config: ProjectConfig,
}

impl ProjectSettings {
    /// Loads the configuration selected by `--config`, or `ferrule.toml` in
    /// the current directory. A missing `ferrule.toml` means defaults.
    pub fn load(global: &GlobalArgs) -> Result<Self, Box<dyn std::error::Error>> {
        match global.config.as_deref().map(Path::new) {
            Some(path) if path.is_file() => {
                let root = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."));
                let config = ferrule_config::load_config(path)?;
                Ok(Self { root, config })
            }
            Some(dir) => Self::load_dir(dir),
            None => Self::load_dir(&std::env::current_dir()?),
        }
    }

    fn load_dir(root: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let config = ferrule_config::load_project_config(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            config,
        })
    }

    /// Applies `--contracts-dir` and `--artifacts-dir`.
    pub fn apply_paths(&mut self, paths: &PathArgs) {
        if let Some(dir) = &paths.contracts_dir {
            self.config.paths.contracts_dir = dir.clone();
        }
        if let Some(dir) = &paths.artifacts_dir {
            self.config.paths.artifacts_dir = dir.clone();
        }
    }

    /// Applies the node and transaction flags.
    pub fn apply_node(&mut self, node: &NodeArgs) {
        if let Some(port) = node.jsonrpc_port {
            self.config.deploy.jsonrpc_port = port;
        }
        if let Some(price) = &node.gas_price {
            self.config.deploy.gas_price = price.clone();
        }
        if let Some(from) = &node.from {
            self.config.deploy.from = Some(from.clone());
        }
    }

    /// Applies `--network-id` and `--optimize`.
    pub fn apply_compile(&mut self, network_id: Option<u64>, optimize: bool) {
        if let Some(id) = network_id {
            self.config.compile.network_id = NetworkId::new(id);
        }
        if optimize {
            self.config.compile.optimize = true;
        }
    }

    /// Resolves a configured path against the project root.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    /// The contracts directory.
    pub fn contracts_dir(&self) -> PathBuf {
        self.resolve(&self.config.paths.contracts_dir)
    }

    /// The artifacts directory.
    pub fn artifacts_dir(&self) -> PathBuf {
        self.resolve(&self.config.paths.artifacts_dir)
    }

    /// The directory relative compiler binaries live in.
    pub fn compilers_dir(&self) -> PathBuf {
        self.resolve(&self.config.paths.compilers_dir)
    }

    /// The migration plan file.
    pub fn migrations(&self) -> PathBuf {
        self.resolve(&self.config.paths.migrations)
    }

    /// Sender and gas price for deployments.
    pub fn tx_defaults(&self) -> Result<TxDefaults, Box<dyn std::error::Error>> {
        let deploy = &self.config.deploy;
        let gas_price = deploy.gas_price_wei().ok_or_else(|| {
            format!(
                "gas price '{}' is not an integer amount of wei",
                deploy.gas_price
            )
        })?;
        let from = deploy
            .from
            .as_deref()
            .map(|from| {
                from.parse::<Address>()
                    .map_err(|_| format!("'{from}' is not an address"))
            })
            .transpose()?;
        Ok(TxDefaults { from, gas_price })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn global(config: Option<&Path>) -> GlobalArgs {
        GlobalArgs {
            quiet: false,
            verbose: false,
            color: false,
            config: config.map(|p| p.to_str().unwrap().to_string()),
        }
    }

    #[test]
    fn config_file_sets_root_to_its_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("custom.toml");
        fs::write(&path, "[compile]\nnetwork_id = 3\n").unwrap();

        let settings = ProjectSettings::load(&global(Some(&path))).unwrap();
        assert_eq!(settings.root, tmp.path());
        assert_eq!(settings.config.compile.network_id, NetworkId::new(3));
        assert_eq!(settings.contracts_dir(), tmp.path().join("contracts"));
    }

    #[test]
    fn config_dir_without_file_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = ProjectSettings::load(&global(Some(tmp.path()))).unwrap();
        assert_eq!(settings.root, tmp.path());
        assert_eq!(
            settings.artifacts_dir(),
            tmp.path().join("build").join("artifacts")
        );
        assert_eq!(settings.migrations(), tmp.path().join("migrations.toml"));
    }

    #[test]
    fn invalid_config_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("ferrule.toml"), "[compile]\nnetwork_id = 0\n").unwrap();
        assert!(ProjectSettings::load(&global(Some(tmp.path()))).is_err());
    }

    #[test]
    fn flags_override_config() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join("ferrule.toml"),
            "[paths]\ncontracts_dir = \"sol\"\n[deploy]\njsonrpc_port = 9000\n",
        )
        .unwrap();
        let mut settings = ProjectSettings::load(&global(Some(tmp.path()))).unwrap();
        settings.apply_paths(&PathArgs {
            contracts_dir: None,
            artifacts_dir: Some("out".to_string()),
        });
        settings.apply_node(&NodeArgs {
            jsonrpc_port: Some(8546),
            gas_price: Some("7".to_string()),
            from: None,
        });
        settings.apply_compile(Some(1), true);

        assert_eq!(settings.contracts_dir(), tmp.path().join("sol"));
        assert_eq!(settings.artifacts_dir(), tmp.path().join("out"));
        assert_eq!(settings.config.deploy.jsonrpc_port, 8546);
        assert_eq!(settings.config.compile.network_id, NetworkId::new(1));
        assert!(settings.config.compile.optimize);
        assert_eq!(settings.tx_defaults().unwrap().gas_price, 7);
    }

    #[test]
    fn tx_defaults_parse_sender() {
        let tmp = tempfile::tempdir().unwrap();
        let mut settings = ProjectSettings::load(&global(Some(tmp.path()))).unwrap();
        assert_eq!(settings.tx_defaults().unwrap().from, None);
        assert_eq!(settings.tx_defaults().unwrap().gas_price, 20_000_000_000);

        settings.apply_node(&NodeArgs {
            from: Some("0x1111111111111111111111111111111111111111".to_string()),
            ..NodeArgs::default()
        });
        assert_eq!(
            settings.tx_defaults().unwrap().from,
            Some(Address::repeat_byte(0x11))
        );

        settings.apply_node(&NodeArgs {
            gas_price: Some("cheap".to_string()),
            ..NodeArgs::default()
        });
        assert!(settings.tx_defaults().is_err());
    }
}
