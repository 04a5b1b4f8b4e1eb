//! Verification of an existing deployment.

use alloy_primitives::Address;
use clap::Args;
use deploy_driver::ConstructorArgs;

use super::print_verification;
use crate::flags::GlobalArgs;

/// The verify command.
#[derive(Debug, Clone, Args)]
pub(crate) struct VerifyCommand {
    /// Deployed contract address.
    address: Address,

    /// Contract name, bare or fully qualified.
    contract: String,

    /// Constructor arguments the contract was deployed with.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

impl VerifyCommand {
    /// Runs the verify command.
    pub(crate) async fn run(&self, global: &GlobalArgs) -> eyre::Result<()> {
        let runner = global.runner().await?;
        let args = ConstructorArgs::Raw(self.args.clone());
        let report = runner.verify(&self.contract, self.address, &args).await?;
        global.print(&report, |report| {
            println!("{} at {}", self.contract, self.address);
            print_verification(report);
        })
    }
}
