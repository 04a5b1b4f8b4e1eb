//! Flags shared by every command, and the setup they drive.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use clap::Parser;
use deploy_artifacts::{ArtifactStore, DEFAULT_ARTIFACTS_DIR};
use deploy_cli_utils::LogArgs;
use deploy_config::{DEFAULT_CONFIG_FILE, DeployConfig, DeployEnv};
use deploy_driver::{DeployClient, DeploymentRunner, resolve_signer};
use eyre::WrapErr;
use serde::Serialize;

/// Global arguments for the CLI.
#[derive(Debug, Clone, Parser)]
pub(crate) struct GlobalArgs {
    /// Logging arguments.
    #[command(flatten)]
    pub(crate) log_args: LogArgs,

    /// Network to deploy to, as named in the network registry.
    #[arg(long, short = 'n', global = true, default_value = "hardhat", env = "DEPLOYER_NETWORK")]
    pub(crate) network: String,

    /// Project configuration file. Defaults to `deployer.yaml` when present.
    #[arg(long, global = true, env = "DEPLOYER_CONFIG")]
    pub(crate) config: Option<PathBuf>,

    /// Hardhat artifacts directory.
    #[arg(long, global = true, default_value = DEFAULT_ARTIFACTS_DIR, env = "DEPLOYER_ARTIFACTS")]
    pub(crate) artifacts: PathBuf,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub(crate) json: bool,

    /// How often to poll the chain head while waiting for confirmations.
    #[arg(long, global = true, value_parser = humantime::parse_duration, default_value = "2s")]
    pub(crate) confirmation_poll_interval: Duration,
}

impl GlobalArgs {
    /// Loads the project configuration. An explicit `--config` must exist.
    pub(crate) fn load_config(&self) -> eyre::Result<DeployConfig> {
        let config = match &self.config {
            Some(path) => DeployConfig::load(path),
            None => DeployConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE)),
        };
        config.wrap_err("failed to load project configuration")
    }

    /// Resolves the network and signer, connects, and builds a runner.
    pub(crate) async fn runner(&self) -> eyre::Result<DeploymentRunner> {
        let config = self.load_config()?;
        let env = DeployEnv::from_env();
        let network = config.networks.resolve(&self.network, &env)?;
        let signer = resolve_signer(&network, &env)?;

        let client = DeployClient::connect(network, signer)
            .await
            .wrap_err_with(|| format!("failed to connect to network {}", self.network))?
            .with_poll_interval(self.confirmation_poll_interval);

        Ok(DeploymentRunner::new(
            client,
            ArtifactStore::new(&self.artifacts),
            config.compilers,
            env.etherscan_api_key,
        ))
    }

    /// Prints `value` as pretty JSON when `--json` is set, otherwise runs `human`.
    pub(crate) fn print<T: Serialize + ?Sized>(
        &self,
        value: &T,
        human: impl FnOnce(&T),
    ) -> eyre::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            human(value);
        }
        Ok(())
    }
}
