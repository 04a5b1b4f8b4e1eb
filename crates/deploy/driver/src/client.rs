//! Wallet-enabled JSON-RPC client for deployments.

use std::time::Duration;

use alloy_network::{EthereumWallet, ReceiptResponse};
use alloy_primitives::{Address, B256, Bytes};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_signer_local::PrivateKeySigner;
use deploy_config::ResolvedNetwork;
use serde::Serialize;
use tracing::{debug, info};

use crate::{DeployError, DeployRequest};

/// Interval between `eth_blockNumber` polls while waiting for confirmations.
pub const DEFAULT_CONFIRMATION_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Number of confirmations a transaction included at `included` has when the chain head
/// is `head`. The including block counts as the first.
pub const fn confirmations_at(included: u64, head: u64) -> u64 {
    if head < included { 0 } else { head - included + 1 }
}

/// A mined contract creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// Fully qualified contract name.
    pub contract: String,
    /// Address of the new contract.
    pub address: Address,
    /// Creation transaction.
    pub tx_hash: B256,
    /// Block the transaction was included in.
    pub block_number: Option<u64>,
    /// Gas used by the creation.
    pub gas_used: u64,
}

/// Sends deployments to one network from one account.
#[derive(Debug, Clone)]
pub struct DeployClient {
    provider: DynProvider,
    network: ResolvedNetwork,
    deployer: Address,
    poll_interval: Duration,
}

impl DeployClient {
    /// Connects to `network` and checks that the endpoint serves the declared chain.
    pub async fn connect(
        network: ResolvedNetwork,
        signer: PrivateKeySigner,
    ) -> Result<Self, DeployError> {
        let deployer = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(network.rpc_url.clone())
            .erased();

        let actual = provider.get_chain_id().await?;
        if actual != network.chain_id {
            return Err(DeployError::ChainIdMismatch {
                network: network.name,
                expected: network.chain_id,
                actual,
            });
        }
        debug!(network = %network.name, chain_id = actual, rpc = %network.rpc_url, "Connected");

        Ok(Self { provider, network, deployer, poll_interval: DEFAULT_CONFIRMATION_POLL_INTERVAL })
    }

    /// Overrides the confirmation poll interval.
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// The deploying account.
    pub const fn deployer(&self) -> Address {
        self.deployer
    }

    /// The network this client is connected to.
    pub const fn network(&self) -> &ResolvedNetwork {
        &self.network
    }

    /// Sends the creation transaction and waits for its receipt.
    pub async fn deploy(&self, request: &DeployRequest) -> Result<Deployment, DeployError> {
        let pending = self.provider.send_transaction(request.transaction(self.deployer)).await?;
        let tx_hash = *pending.tx_hash();
        info!(contract = %request.contract, %tx_hash, "Sent deployment transaction");

        let receipt = pending.get_receipt().await?;
        if !receipt.status() {
            return Err(DeployError::Reverted { contract: request.contract.clone(), tx_hash });
        }
        let address =
            receipt.contract_address().ok_or(DeployError::MissingContractAddress(tx_hash))?;

        Ok(Deployment {
            contract: request.contract.clone(),
            address,
            tx_hash,
            block_number: receipt.block_number(),
            gas_used: receipt.gas_used(),
        })
    }

    /// Current chain head.
    pub async fn block_number(&self) -> Result<u64, DeployError> {
        Ok(self.provider.get_block_number().await?)
    }

    /// Runtime code at `address`.
    pub async fn code_at(&self, address: Address) -> Result<Bytes, DeployError> {
        Ok(self.provider.get_code_at(address).await?)
    }

    /// Polls the chain head until a transaction included at `included` has
    /// `confirmations` confirmations. Returns the head block that satisfied it.
    pub async fn wait_for_confirmations(
        &self,
        included: u64,
        confirmations: u64,
    ) -> Result<u64, DeployError> {
        loop {
            let head = self.block_number().await?;
            let current = confirmations_at(included, head);
            if current >= confirmations {
                return Ok(head);
            }
            debug!(included, head, current, target = confirmations, "Waiting for confirmations");
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use deploy_config::{DeployEnv, Networks};
    use rstest::rstest;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_partial_json, method},
    };

    use super::*;
    use crate::DEV_PRIVATE_KEY;

    fn rpc_result(result: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200)
            .set_body_json(json!({"jsonrpc": "2.0", "id": 0, "result": result}))
    }

    async fn mount_chain_id(server: &MockServer, chain_id: &str) {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"method": "eth_chainId"})))
            .respond_with(rpc_result(json!(chain_id)))
            .mount(server)
            .await;
    }

    fn network(server: &MockServer, name: &str) -> ResolvedNetwork {
        let env = DeployEnv { rpc_url: Some(server.uri()), ..Default::default() };
        Networks::builtin().resolve(name, &env).unwrap()
    }

    fn signer() -> PrivateKeySigner {
        PrivateKeySigner::from_bytes(&DEV_PRIVATE_KEY).unwrap()
    }

    #[rstest]
    #[case::included_now(10, 10, 1)]
    #[case::five_deep(10, 14, 5)]
    #[case::head_behind(10, 9, 0)]
    #[case::genesis(0, 0, 1)]
    fn counts_confirmations(#[case] included: u64, #[case] head: u64, #[case] expected: u64) {
        assert_eq!(confirmations_at(included, head), expected);
    }

    #[tokio::test]
    async fn connects_when_chain_id_matches() {
        let server = MockServer::start().await;
        mount_chain_id(&server, "0x7a69").await;

        let client = DeployClient::connect(network(&server, "hardhat"), signer()).await.unwrap();

        assert_eq!(client.network().chain_id, 31337);
        assert_eq!(client.deployer(), signer().address());
    }

    #[tokio::test]
    async fn rejects_endpoint_for_another_chain() {
        let server = MockServer::start().await;
        mount_chain_id(&server, "0x1").await;

        let err = DeployClient::connect(network(&server, "sepolia"), signer()).await.unwrap_err();

        assert!(matches!(
            err,
            DeployError::ChainIdMismatch { expected: 11_155_111, actual: 1, .. }
        ));
    }

    #[tokio::test]
    async fn waits_until_enough_confirmations() {
        let server = MockServer::start().await;
        mount_chain_id(&server, "0x7a69").await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"method": "eth_blockNumber"})))
            .respond_with(rpc_result(json!("0x65")))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"method": "eth_blockNumber"})))
            .respond_with(rpc_result(json!("0x68")))
            .mount(&server)
            .await;

        let client = DeployClient::connect(network(&server, "hardhat"), signer())
            .await
            .unwrap()
            .with_poll_interval(Duration::from_millis(5));

        // Included at 100: head 101 gives 2 confirmations, head 104 gives 5.
        let head = client.wait_for_confirmations(100, 5).await.unwrap();
        assert_eq!(head, 104);
    }

    #[tokio::test]
    async fn rpc_errors_propagate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 0,
                "error": {"code": -32601, "message": "method not found"}
            })))
            .mount(&server)
            .await;

        let err = DeployClient::connect(network(&server, "hardhat"), signer()).await.unwrap_err();
        assert!(matches!(err, DeployError::Rpc(_)));
    }
}
