//! Named networks and their resolution against the environment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{ConfigError, DeployEnv, RPC_URL_VAR};

const LOCAL_RPC_URL: &str = "http://127.0.0.1:8545";
const ETHERSCAN_V2_API_URL: &str = "https://api.etherscan.io/v2/api";

/// Block-explorer endpoints for a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Etherscan-compatible API endpoint.
    pub api_url: Url,
    /// Human-facing explorer root, used to print links.
    pub browser_url: Url,
}

impl ExplorerConfig {
    fn etherscan_v2(browser_url: &'static str) -> Self {
        Self { api_url: builtin_url(ETHERSCAN_V2_API_URL), browser_url: builtin_url(browser_url) }
    }

    /// Link to an address page on the explorer.
    pub fn address_link(&self, address: impl std::fmt::Display) -> String {
        format!("{}/address/{address}#code", self.browser_url.as_str().trim_end_matches('/'))
    }
}

/// A named network the deployer can target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Registry name, as passed to `--network`.
    pub name: String,
    /// EIP-155 chain id.
    pub chain_id: u64,
    /// Default RPC endpoint; `RPC_URL` takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,
    /// Block explorer used for source verification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorer: Option<ExplorerConfig>,
    /// Development networks are never verified.
    #[serde(default)]
    pub local: bool,
}

fn builtin_url(url: &'static str) -> Url {
    Url::parse(url).expect("built-in URLs are valid")
}

impl NetworkConfig {
    fn local(name: &str) -> Self {
        Self {
            name: name.to_string(),
            chain_id: 31337,
            url: Some(builtin_url(LOCAL_RPC_URL)),
            explorer: None,
            local: true,
        }
    }

    fn remote(name: &str, chain_id: u64, browser_url: &'static str) -> Self {
        Self {
            name: name.to_string(),
            chain_id,
            url: None,
            explorer: Some(ExplorerConfig::etherscan_v2(browser_url)),
            local: false,
        }
    }

    /// Development node on the default port. No in-process chain exists here, so this
    /// is an alias of [`Self::localhost`] kept for the familiar default name.
    pub fn hardhat() -> Self {
        Self::local("hardhat")
    }

    /// Development node on `127.0.0.1:8545`.
    pub fn localhost() -> Self {
        Self::local("localhost")
    }

    /// Ethereum mainnet.
    pub fn mainnet() -> Self {
        Self::remote("mainnet", 1, "https://etherscan.io")
    }

    /// Ethereum Sepolia.
    pub fn sepolia() -> Self {
        Self::remote("sepolia", 11_155_111, "https://sepolia.etherscan.io")
    }

    /// Base mainnet.
    pub fn base() -> Self {
        Self::remote("base", 8453, "https://basescan.org")
    }

    /// Base Sepolia.
    pub fn base_sepolia() -> Self {
        Self::remote("base-sepolia", 84532, "https://sepolia.basescan.org")
    }
}

/// A network with its endpoint fixed for this invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNetwork {
    /// Registry name.
    pub name: String,
    /// Expected chain id.
    pub chain_id: u64,
    /// Endpoint the client connects to.
    pub rpc_url: Url,
    /// Verification endpoints, if the network has an explorer.
    pub explorer: Option<ExplorerConfig>,
    /// Development network.
    pub local: bool,
}

impl ResolvedNetwork {
    /// Whether deployments on this network go through source verification.
    pub const fn should_verify(&self) -> bool {
        !self.local
    }
}

/// Registry of named networks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Networks {
    networks: BTreeMap<String, NetworkConfig>,
}

impl Default for Networks {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Networks {
    /// The built-in networks.
    pub fn builtin() -> Self {
        let networks = [
            NetworkConfig::hardhat(),
            NetworkConfig::localhost(),
            NetworkConfig::mainnet(),
            NetworkConfig::sepolia(),
            NetworkConfig::base(),
            NetworkConfig::base_sepolia(),
        ]
        .into_iter()
        .map(|network| (network.name.clone(), network))
        .collect();

        Self { networks }
    }

    /// Looks a network up by name.
    pub fn get(&self, name: &str) -> Option<&NetworkConfig> {
        self.networks.get(name)
    }

    /// Adds or replaces a network.
    pub fn insert(&mut self, network: NetworkConfig) {
        self.networks.insert(network.name.clone(), network);
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.networks.keys().map(String::as_str)
    }

    /// All networks in name order.
    pub fn iter(&self) -> impl Iterator<Item = &NetworkConfig> {
        self.networks.values()
    }

    /// Resolves `name` to a concrete endpoint.
    ///
    /// `RPC_URL` from the environment wins over the network's configured URL. Remote
    /// built-ins ship without a URL, so for them `RPC_URL` is required.
    pub fn resolve(&self, name: &str, env: &DeployEnv) -> Result<ResolvedNetwork, ConfigError> {
        let network = self.get(name).ok_or_else(|| ConfigError::UnknownNetwork {
            name: name.to_string(),
            known: self.names().collect::<Vec<_>>().join(", "),
        })?;

        let rpc_url = match env.rpc_url.as_deref() {
            Some(raw) => validate_rpc_url(raw)?,
            None => match &network.url {
                Some(url) => validate_rpc_url(url.as_str())?,
                None => return Err(ConfigError::MissingEnv(RPC_URL_VAR)),
            },
        };

        Ok(ResolvedNetwork {
            name: network.name.clone(),
            chain_id: network.chain_id,
            rpc_url,
            explorer: network.explorer.clone(),
            local: network.local,
        })
    }
}

/// Parses an RPC endpoint, accepting only http(s) URLs with a host.
pub fn validate_rpc_url(raw: &str) -> Result<Url, ConfigError> {
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => Ok(url),
        _ => Err(ConfigError::InvalidRpcUrl(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn env_with_rpc(rpc_url: Option<&str>) -> DeployEnv {
        DeployEnv { rpc_url: rpc_url.map(str::to_string), ..Default::default() }
    }

    #[rstest]
    #[case::hardhat("hardhat", 31337)]
    #[case::localhost("localhost", 31337)]
    #[case::mainnet("mainnet", 1)]
    #[case::sepolia("sepolia", 11_155_111)]
    #[case::base("base", 8453)]
    #[case::base_sepolia("base-sepolia", 84532)]
    fn resolves_declared_chain_id_and_env_url(#[case] name: &str, #[case] chain_id: u64) {
        let env = env_with_rpc(Some("https://rpc.example.com/v1"));
        let resolved = Networks::builtin().resolve(name, &env).unwrap();

        assert_eq!(resolved.name, name);
        assert_eq!(resolved.chain_id, chain_id);
        assert_eq!(resolved.rpc_url.as_str(), "https://rpc.example.com/v1");
    }

    #[rstest]
    #[case::hardhat("hardhat")]
    #[case::localhost("localhost")]
    fn local_networks_default_to_loopback(#[case] name: &str) {
        let resolved = Networks::builtin().resolve(name, &DeployEnv::default()).unwrap();

        assert_eq!(resolved.rpc_url.as_str(), "http://127.0.0.1:8545/");
        assert!(resolved.local);
        assert!(!resolved.should_verify());
        assert!(resolved.explorer.is_none());
    }

    #[test]
    fn remote_network_requires_rpc_url() {
        let err = Networks::builtin().resolve("sepolia", &DeployEnv::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv("RPC_URL")));
    }

    #[test]
    fn remote_networks_verify_through_etherscan() {
        let env = env_with_rpc(Some("https://rpc.example.com"));
        let resolved = Networks::builtin().resolve("base", &env).unwrap();

        assert!(resolved.should_verify());
        let explorer = resolved.explorer.unwrap();
        assert_eq!(explorer.api_url.as_str(), "https://api.etherscan.io/v2/api");
        assert_eq!(
            explorer.address_link("0x0000000000000000000000000000000000000001"),
            "https://basescan.org/address/0x0000000000000000000000000000000000000001#code"
        );
    }

    #[test]
    fn unknown_network_lists_known_names() {
        let err = Networks::builtin().resolve("goerli", &DeployEnv::default()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("goerli"));
        assert!(message.contains("base-sepolia, hardhat, localhost, mainnet, sepolia"));
    }

    #[rstest]
    #[case::garbage("not a url")]
    #[case::ftp("ftp://files.example.com")]
    #[case::file("file:///etc/passwd")]
    fn rejects_non_http_rpc_urls(#[case] raw: &str) {
        let err = Networks::builtin().resolve("hardhat", &env_with_rpc(Some(raw))).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRpcUrl(_)));
    }

    #[test]
    fn inserted_network_replaces_builtin() {
        let mut networks = Networks::builtin();
        let mut custom = NetworkConfig::sepolia();
        custom.url = Some("https://sepolia.example.org".parse().unwrap());
        networks.insert(custom);

        let resolved = networks.resolve("sepolia", &DeployEnv::default()).unwrap();
        assert_eq!(resolved.rpc_url.as_str(), "https://sepolia.example.org/");
    }
}
