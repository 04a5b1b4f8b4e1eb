//! Deployment errors.

use alloy_primitives::{Address, B256};
use alloy_provider::PendingTransactionError;
use alloy_transport::TransportError;
use deploy_artifacts::ArtifactError;
use deploy_config::ConfigError;
use deploy_verify::VerifyError;
use thiserror::Error;

/// Errors raised while deploying a contract.
#[derive(Debug, Error)]
pub enum DeployError {
    /// Configuration or environment problem.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The contract artifact could not be loaded or encoded.
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    /// Source verification failed.
    #[error(transparent)]
    Verify(#[from] VerifyError),

    /// `PRIVATE_KEY` is not a valid secp256k1 key. The key itself is never included.
    #[error("PRIVATE_KEY is not a valid private key: {0}")]
    InvalidPrivateKey(String),

    /// JSON-RPC transport failure.
    #[error("rpc error: {0}")]
    Rpc(#[from] TransportError),

    /// The transaction was sent but its receipt never arrived.
    #[error("failed waiting for transaction receipt: {0}")]
    Pending(#[from] PendingTransactionError),

    /// The endpoint serves a different chain than the network declares.
    #[error("network {network} expects chain id {expected} but the RPC endpoint reports {actual}")]
    ChainIdMismatch {
        /// Network name.
        network: String,
        /// Configured chain id.
        expected: u64,
        /// Chain id reported by the node.
        actual: u64,
    },

    /// The creation transaction was mined but reverted.
    #[error("deployment of {contract} reverted in transaction {tx_hash}")]
    Reverted {
        /// Contract being deployed.
        contract: String,
        /// Reverted transaction.
        tx_hash: B256,
    },

    /// The receipt of a creation transaction has no contract address.
    #[error("receipt of transaction {0} has no contract address")]
    MissingContractAddress(B256),

    /// Verification was requested for an address without code.
    #[error("no contract code at {0}")]
    NoCode(Address),
}
