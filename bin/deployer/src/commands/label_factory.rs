//! `LabelFactory` deployment.

use alloy_primitives::{Address, U256};
use clap::Args;
use deploy_driver::{
    DEFAULT_FEE_TOKEN, DEFAULT_UNISWAP_V3_FACTORY, DeploymentPlan, LabelFactoryParams,
    parse_token_amount,
};
use eyre::WrapErr;

use super::print_report;
use crate::flags::GlobalArgs;

/// The label-factory command.
#[derive(Debug, Clone, Args)]
pub(crate) struct LabelFactoryCommand {
    /// ERC-20 the launch fee is paid in.
    #[arg(long, default_value_t = DEFAULT_FEE_TOKEN)]
    fee_token: Address,

    /// Launch fee in whole tokens; decimals allowed.
    #[arg(long, default_value = "500")]
    launch_fee: String,

    /// Decimals of the fee token.
    #[arg(long, default_value_t = 18)]
    fee_decimals: u8,

    /// Uniswap V3 factory.
    #[arg(long, default_value_t = DEFAULT_UNISWAP_V3_FACTORY)]
    uniswap_factory: Address,

    /// Initial owner of the factory. Defaults to the deploying account.
    #[arg(long)]
    owner: Option<Address>,
}

impl LabelFactoryCommand {
    /// Constructor parameters from the flags.
    pub(crate) fn params(&self) -> eyre::Result<LabelFactoryParams> {
        let launch_fee: U256 = parse_token_amount(&self.launch_fee, self.fee_decimals)
            .wrap_err_with(|| format!("invalid launch fee {:?}", self.launch_fee))?;
        Ok(LabelFactoryParams {
            fee_token: self.fee_token,
            launch_fee,
            uniswap_factory: self.uniswap_factory,
            owner: self.owner,
        })
    }

    /// Runs the label-factory command.
    pub(crate) async fn run(&self, global: &GlobalArgs) -> eyre::Result<()> {
        let params = self.params()?;
        let runner = global.runner().await?;
        let plan = DeploymentPlan::label_factory(&params, runner.deployer());
        let report = runner.run(&plan).await?;
        print_report(global, &report)
    }
}
