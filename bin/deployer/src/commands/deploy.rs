//! Generic contract deployment.

use clap::Args;
use deploy_driver::{DeploymentPlan, VerifyStep};

use super::print_report;
use crate::flags::GlobalArgs;

/// The deploy command.
#[derive(Debug, Clone, Args)]
pub(crate) struct DeployCommand {
    /// Verify the source after deployment (public networks only).
    #[arg(long)]
    verify: bool,

    /// Confirmations to wait for before verifying.
    #[arg(long, default_value_t = VerifyStep::default().confirmations)]
    confirmations: u64,

    /// Contract name, bare (`Token`) or fully qualified (`contracts/Token.sol:Token`).
    contract: String,

    /// Constructor arguments in declaration order.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

impl DeployCommand {
    /// The deployment plan for these arguments.
    pub(crate) fn plan(&self) -> DeploymentPlan {
        let verify = self.verify.then_some(VerifyStep { confirmations: self.confirmations });
        DeploymentPlan::generic(&self.contract, self.args.clone(), verify)
    }

    /// Runs the deploy command.
    pub(crate) async fn run(&self, global: &GlobalArgs) -> eyre::Result<()> {
        let runner = global.runner().await?;
        let report = runner.run(&self.plan()).await?;
        print_report(global, &report)
    }
}
