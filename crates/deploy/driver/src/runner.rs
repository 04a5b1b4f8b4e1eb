//! The deployment procedure: load, deploy, confirm, verify.

use alloy_primitives::{Address, Bytes};
use deploy_artifacts::{ArtifactStore, ContractArtifact};
use deploy_config::{CompilerConfig, ExplorerConfig};
use deploy_verify::{EtherscanClient, VerifyError};
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    ConstructorArgs, DeployClient, DeployError, DeployRequest, Deployment, DeploymentPlan,
    VerificationReport, verification_request,
};

/// What a run did, printed by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentReport {
    /// Network name.
    pub network: String,
    /// Chain id.
    pub chain_id: u64,
    /// Deploying account.
    pub deployer: Address,
    /// The mined deployment.
    pub deployment: Deployment,
    /// Verification result.
    pub verification: VerificationReport,
}

/// Executes deployment plans against one network.
#[derive(Debug)]
pub struct DeploymentRunner {
    client: DeployClient,
    store: ArtifactStore,
    compilers: CompilerConfig,
    verifier: Option<EtherscanClient>,
}

impl DeploymentRunner {
    /// Creates a runner. Verification needs both an explorer on the network and an API key.
    pub fn new(
        client: DeployClient,
        store: ArtifactStore,
        compilers: CompilerConfig,
        etherscan_api_key: Option<String>,
    ) -> Self {
        let network = client.network();
        let verifier = network.explorer.as_ref().zip(etherscan_api_key).map(|(explorer, key)| {
            EtherscanClient::new(explorer.api_url.clone(), key, network.chain_id)
        });
        Self { client, store, compilers, verifier }
    }

    /// Replaces the explorer client.
    pub fn with_verifier(mut self, verifier: EtherscanClient) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// The deploying account.
    pub const fn deployer(&self) -> Address {
        self.client.deployer()
    }

    /// Runs `plan`.
    ///
    /// On non-local networks a plan with a verification step waits for the requested
    /// confirmations and then verifies the contract with the same constructor arguments.
    pub async fn run(&self, plan: &DeploymentPlan) -> Result<DeploymentReport, DeployError> {
        let network = self.client.network();
        let verify = plan.verify.filter(|_| network.should_verify());
        if verify.is_some() {
            // Missing explorer or API key fails the run before anything is sent.
            self.verifier()?;
        }

        let deployer = self.client.deployer();
        info!(network = %network.name, "Deploying contracts with the account: {deployer}");

        let artifact = self.store.load(&plan.contract)?;
        let args = plan.args.resolve(&artifact)?;
        let request = DeployRequest::new(&artifact, &args)?;
        let deployment = self.client.deploy(&request).await?;
        info!(
            tx_hash = %deployment.tx_hash,
            gas_used = deployment.gas_used,
            "{} deployed to: {}",
            artifact.contract_name,
            deployment.address
        );

        let verification = match verify {
            Some(step) => {
                info!(confirmations = step.confirmations, "Waiting for block confirmations...");
                let included = match deployment.block_number {
                    Some(block) => block,
                    None => self.client.block_number().await?,
                };
                self.client.wait_for_confirmations(included, step.confirmations).await?;

                info!("Verifying contract...");
                let constructor_args = artifact.encode_args(&args)?;
                self.verify_artifact(&artifact, deployment.address, constructor_args).await?
            }
            None => {
                if plan.verify.is_some() {
                    debug!(network = %network.name, "Skipping verification on a local network");
                }
                VerificationReport::skipped()
            }
        };

        Ok(DeploymentReport {
            network: network.name.clone(),
            chain_id: network.chain_id,
            deployer,
            deployment,
            verification,
        })
    }

    /// Verifies a contract that is already deployed at `address`.
    pub async fn verify(
        &self,
        contract: &str,
        address: Address,
        args: &ConstructorArgs,
    ) -> Result<VerificationReport, DeployError> {
        let artifact = self.store.load(contract)?;
        if self.client.code_at(address).await?.is_empty() {
            return Err(DeployError::NoCode(address));
        }

        info!(%address, "Verifying contract...");
        let constructor_args = artifact.encode_args(&args.resolve(&artifact)?)?;
        self.verify_artifact(&artifact, address, constructor_args).await
    }

    fn verifier(&self) -> Result<(&ExplorerConfig, &EtherscanClient), VerifyError> {
        let network = self.client.network();
        let explorer = network
            .explorer
            .as_ref()
            .ok_or_else(|| VerifyError::NoExplorer(network.name.clone()))?;
        let verifier = self
            .verifier
            .as_ref()
            .ok_or_else(|| VerifyError::MissingApiKey(network.name.clone()))?;
        Ok((explorer, verifier))
    }

    async fn verify_artifact(
        &self,
        artifact: &ContractArtifact,
        address: Address,
        constructor_args: Bytes,
    ) -> Result<VerificationReport, DeployError> {
        let (explorer, verifier) = self.verifier()?;
        let (store, compilers) = (&self.store, &self.compilers);
        let request = verification_request(store, compilers, artifact, address, constructor_args)?;
        let outcome = verifier.verify(&request).await?;

        let link = explorer.address_link(address);
        info!(contract = %artifact.contract_name, "Verified: {link}");
        Ok(VerificationReport::from_outcome(outcome, Some(link)))
    }
}
