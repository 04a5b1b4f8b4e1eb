//! Credentials and endpoints read from the process environment.

use std::fmt;

use tracing::debug;

/// RPC endpoint override.
pub const RPC_URL_VAR: &str = "RPC_URL";
/// Hex-encoded signing key.
pub const PRIVATE_KEY_VAR: &str = "PRIVATE_KEY";
/// Block-explorer API key.
pub const ETHERSCAN_API_KEY_VAR: &str = "ETHERSCAN_API_KEY";

/// Environment inputs of a deployment. Empty values count as unset.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DeployEnv {
    /// `RPC_URL`.
    pub rpc_url: Option<String>,
    /// `PRIVATE_KEY`.
    pub private_key: Option<String>,
    /// `ETHERSCAN_API_KEY`.
    pub etherscan_api_key: Option<String>,
}

impl fmt::Debug for DeployEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployEnv")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("etherscan_api_key", &self.etherscan_api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl DeployEnv {
    /// Reads the process environment after loading `.env` from the working directory.
    ///
    /// Variables already set in the environment are not overridden by `.env`.
    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "Loaded .env file"),
            Err(err) if err.not_found() => {}
            Err(err) => debug!(error = %err, "Ignoring unreadable .env file"),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the environment from an arbitrary lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key).map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
        };
        Self {
            rpc_url: read(RPC_URL_VAR),
            private_key: read(PRIVATE_KEY_VAR),
            etherscan_api_key: read(ETHERSCAN_API_KEY_VAR),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn reads_all_variables() {
        let env = DeployEnv::from_lookup(lookup(&[
            ("RPC_URL", "https://rpc.example.com"),
            ("PRIVATE_KEY", "0xabc"),
            ("ETHERSCAN_API_KEY", "KEY"),
        ]));

        assert_eq!(env.rpc_url.as_deref(), Some("https://rpc.example.com"));
        assert_eq!(env.private_key.as_deref(), Some("0xabc"));
        assert_eq!(env.etherscan_api_key.as_deref(), Some("KEY"));
    }

    #[test]
    fn blank_values_are_unset() {
        let env = DeployEnv::from_lookup(lookup(&[("RPC_URL", "  "), ("PRIVATE_KEY", "")]));
        assert_eq!(env, DeployEnv::default());
    }

    #[test]
    fn debug_redacts_secrets() {
        let env = DeployEnv::from_lookup(lookup(&[
            ("PRIVATE_KEY", "0xsecret"),
            ("ETHERSCAN_API_KEY", "apikey"),
        ]));
        let rendered = format!("{env:?}");

        assert!(!rendered.contains("0xsecret"));
        assert!(!rendered.contains("apikey"));
        assert!(rendered.contains("<redacted>"));
    }
}
