//! The optional `deployer.yaml` project file.

use std::{collections::BTreeMap, path::Path};

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::{CompilerConfig, ConfigError, ExplorerConfig, NetworkConfig, Networks};

/// Project file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "deployer.yaml";

/// Compiler and network configuration for a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployConfig {
    /// Compiler profiles.
    pub compilers: CompilerConfig,
    /// Network registry, built-ins plus project definitions.
    pub networks: Networks,
}

/// On-disk schema. Every field is optional so a file can touch a single network.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    compilers: Option<CompilerConfig>,
    #[serde(default)]
    networks: BTreeMap<String, NetworkOverride>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct NetworkOverride {
    chain_id: Option<u64>,
    url: Option<Url>,
    explorer: Option<ExplorerConfig>,
    local: Option<bool>,
}

impl NetworkOverride {
    fn apply(self, name: &str, base: Option<&NetworkConfig>) -> Result<NetworkConfig, ConfigError> {
        let chain_id = match (self.chain_id, base) {
            (Some(chain_id), _) => chain_id,
            (None, Some(base)) => base.chain_id,
            (None, None) => {
                return Err(ConfigError::IncompleteNetwork {
                    name: name.to_string(),
                    field: "chain_id",
                });
            }
        };

        Ok(NetworkConfig {
            name: name.to_string(),
            chain_id,
            url: self.url.or_else(|| base.and_then(|b| b.url.clone())),
            explorer: self.explorer.or_else(|| base.and_then(|b| b.explorer.clone())),
            local: self.local.or(base.map(|b| b.local)).unwrap_or(false),
        })
    }
}

impl DeployConfig {
    /// Loads `path` if it exists, otherwise returns the built-in configuration.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "No project config file, using built-in configuration");
            Ok(Self::default())
        }
    }

    /// Loads a project file and layers it over the built-ins.
    ///
    /// A `compilers` section replaces the built-in compiler configuration. Each network
    /// entry is merged field by field over the built-in of the same name, if any.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let file: ConfigFile = serde_yaml::from_str(&contents)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        Self::from_file(file)
    }

    fn from_file(file: ConfigFile) -> Result<Self, ConfigError> {
        let mut networks = Networks::builtin();
        for (name, entry) in file.networks {
            let merged = entry.apply(&name, networks.get(&name))?;
            debug!(network = %name, chain_id = merged.chain_id, "Loaded network from project file");
            networks.insert(merged);
        }

        Ok(Self { compilers: file.compilers.unwrap_or_default(), networks })
    }
}
