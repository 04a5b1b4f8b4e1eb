//! Contains cli commands.

use clap::Subcommand;
use deploy_driver::{DeploymentReport, VerificationReport, VerificationState};

use crate::flags::GlobalArgs;

mod label_factory;
pub(crate) use label_factory::LabelFactoryCommand;

mod art_chart_factory;
pub(crate) use art_chart_factory::ArtChartFactoryCommand;

mod deploy;
pub(crate) use deploy::DeployCommand;

mod verify;
pub(crate) use verify::VerifyCommand;

mod networks;
pub(crate) use networks::NetworksCommand;

mod compilers;
pub(crate) use compilers::CompilersCommand;

/// Subcommands for the CLI.
#[derive(Debug, Clone, Subcommand)]
pub(crate) enum Commands {
    /// Deploys `LabelFactory` with the launch fee configuration.
    LabelFactory(LabelFactoryCommand),
    /// Deploys `ArtChartFactory` and verifies it on public networks.
    ArtChartFactory(ArtChartFactoryCommand),
    /// Deploys any compiled contract.
    Deploy(DeployCommand),
    /// Verifies an already deployed contract.
    Verify(VerifyCommand),
    /// Lists the configured networks.
    Networks(NetworksCommand),
    /// Shows the compiler profiles.
    Compilers(CompilersCommand),
}

impl Commands {
    /// Command name for log context.
    pub(crate) const fn name(&self) -> &'static str {
        match self {
            Self::LabelFactory(_) => "label-factory",
            Self::ArtChartFactory(_) => "art-chart-factory",
            Self::Deploy(_) => "deploy",
            Self::Verify(_) => "verify",
            Self::Networks(_) => "networks",
            Self::Compilers(_) => "compilers",
        }
    }

    /// Runs the command.
    pub(crate) async fn run(&self, global: &GlobalArgs) -> eyre::Result<()> {
        match self {
            Self::LabelFactory(cmd) => cmd.run(global).await,
            Self::ArtChartFactory(cmd) => cmd.run(global).await,
            Self::Deploy(cmd) => cmd.run(global).await,
            Self::Verify(cmd) => cmd.run(global).await,
            Self::Networks(cmd) => cmd.run(global),
            Self::Compilers(cmd) => cmd.run(global),
        }
    }
}

fn print_report(global: &GlobalArgs, report: &DeploymentReport) -> eyre::Result<()> {
    global.print(report, |report| {
        let deployment = &report.deployment;
        println!("{} deployed to {}", deployment.contract, deployment.address);
        println!("  network      {} ({})", report.network, report.chain_id);
        println!("  deployer     {}", report.deployer);
        println!("  transaction  {}", deployment.tx_hash);
        println!("  gas used     {}", deployment.gas_used);
        print_verification(&report.verification);
    })
}

fn print_verification(report: &VerificationReport) {
    let state = match report.state {
        VerificationState::Verified => "verified",
        VerificationState::AlreadyVerified => "already verified",
        VerificationState::Skipped => return,
    };
    match &report.explorer_url {
        Some(url) => println!("  source       {state}, {url}"),
        None => println!("  source       {state}"),
    }
}
