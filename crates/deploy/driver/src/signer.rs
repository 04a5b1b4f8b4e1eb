//! Selection of the deploying account.

use alloy_primitives::{B256, b256};
use alloy_signer_local::PrivateKeySigner;
use deploy_config::{ConfigError, DeployEnv, PRIVATE_KEY_VAR, ResolvedNetwork};
use tracing::{debug, warn};

use crate::DeployError;

/// Account #0 of the standard development mnemonic, funded on Hardhat and Anvil nodes.
pub const DEV_PRIVATE_KEY: B256 =
    b256!("0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80");

/// Resolves the signer for `network`.
///
/// `PRIVATE_KEY` is used when set, with or without a `0x` prefix. Local networks fall back
/// to [`DEV_PRIVATE_KEY`]; every other network requires the variable.
pub fn resolve_signer(
    network: &ResolvedNetwork,
    env: &DeployEnv,
) -> Result<PrivateKeySigner, DeployError> {
    if let Some(key) = env.private_key.as_deref() {
        let signer: PrivateKeySigner =
            key.parse().map_err(|err| DeployError::InvalidPrivateKey(format!("{err}")))?;
        debug!(address = %signer.address(), "Using signer from {PRIVATE_KEY_VAR}");
        return Ok(signer);
    }

    if network.local {
        let signer = PrivateKeySigner::from_bytes(&DEV_PRIVATE_KEY)
            .map_err(|err| DeployError::InvalidPrivateKey(err.to_string()))?;
        warn!(
            network = %network.name,
            address = %signer.address(),
            "{PRIVATE_KEY_VAR} not set, using the development account"
        );
        return Ok(signer);
    }

    Err(ConfigError::MissingEnv(PRIVATE_KEY_VAR).into())
}
