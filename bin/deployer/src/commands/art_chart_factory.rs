//! `ArtChartFactory` deployment.

use clap::Args;
use deploy_driver::{ArtChartFactoryParams, DeploymentPlan, VerifyStep};

use super::print_report;
use crate::flags::GlobalArgs;

/// The art-chart-factory command.
#[derive(Debug, Clone, Args)]
pub(crate) struct ArtChartFactoryCommand {
    /// Only the owner may create charts.
    #[arg(long)]
    only_allow_owner: bool,

    /// Confirmations to wait for before verifying.
    #[arg(long, default_value_t = VerifyStep::default().confirmations)]
    confirmations: u64,

    /// Skip source verification.
    #[arg(long)]
    no_verify: bool,
}

impl ArtChartFactoryCommand {
    /// Constructor parameters from the flags.
    pub(crate) fn params(&self) -> ArtChartFactoryParams {
        let verify = (!self.no_verify).then_some(VerifyStep { confirmations: self.confirmations });
        ArtChartFactoryParams { only_allow_owner: self.only_allow_owner, verify }
    }

    /// Runs the art-chart-factory command.
    pub(crate) async fn run(&self, global: &GlobalArgs) -> eyre::Result<()> {
        let runner = global.runner().await?;
        let report = runner.run(&DeploymentPlan::art_chart_factory(&self.params())).await?;
        print_report(global, &report)
    }
}
