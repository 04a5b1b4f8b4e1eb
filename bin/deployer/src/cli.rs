//! Contains the CLI entry point for the deployer binary.

use clap::Parser;
use deploy_cli_utils::{build_runtime, help_styles};
use eyre::WrapErr;
use tracing::debug;

use crate::{commands::Commands, flags::GlobalArgs};

/// Deploys the label and art-chart factories, or any compiled contract.
#[derive(Debug, Clone, Parser)]
#[command(name = "deployer", version, about, long_about = None)]
#[command(styles = help_styles())]
pub(crate) struct Cli {
    /// Global arguments.
    #[command(flatten)]
    pub(crate) global: GlobalArgs,

    /// The command to run.
    #[command(subcommand)]
    pub(crate) command: Commands,
}

impl Cli {
    /// Parses the process arguments.
    pub(crate) fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Installs logging, then executes the command. Errors are returned to `main`, which
    /// reports them once.
    pub(crate) fn run(self) -> eyre::Result<()> {
        self.global.log_args.config().init_tracing_subscriber()?;
        self.execute()
    }

    /// Executes the command on a new runtime.
    pub(crate) fn execute(self) -> eyre::Result<()> {
        let name = self.command.name();
        debug!(command = name, network = %self.global.network, "Running command");

        build_runtime()?
            .block_on(self.command.run(&self.global))
            .wrap_err_with(|| format!("`{name}` failed"))
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;
    use rstest::rstest;

    use super::*;

    const ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("deployer").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn network_defaults_to_hardhat() {
        let cli = parse(&["label-factory"]);
        assert_eq!(cli.global.network, "hardhat");
        assert!(!cli.global.json);
    }

    #[rstest]
    #[case::short(&["-n", "sepolia", "networks"])]
    #[case::long(&["--network", "sepolia", "networks"])]
    #[case::after_subcommand(&["networks", "--network", "sepolia"])]
    fn network_flag_is_global(#[case] args: &[&str]) {
        assert_eq!(parse(args).global.network, "sepolia");
    }

    #[test]
    fn label_factory_defaults_match_the_factory_deployment() {
        let Commands::LabelFactory(cmd) = parse(&["label-factory"]).command else {
            panic!("expected label-factory");
        };
        let params = cmd.params().unwrap();

        assert_eq!(params, deploy_driver::LabelFactoryParams::default());
    }

    #[test]
    fn label_factory_overrides() {
        let Commands::LabelFactory(cmd) = parse(&[
            "label-factory",
            "--launch-fee",
            "25",
            "--fee-decimals",
            "6",
            "--owner",
            "0x000000000000000000000000000000000000dEaD",
        ])
        .command
        else {
            panic!("expected label-factory");
        };
        let params = cmd.params().unwrap();

        assert_eq!(params.launch_fee, alloy_primitives::U256::from(25_000_000u64));
        assert_eq!(params.owner, Some(address!("0x000000000000000000000000000000000000dEaD")));
    }

    #[rstest]
    #[case::defaults(&["art-chart-factory"], false, Some(5))]
    #[case::owner_only(&["art-chart-factory", "--only-allow-owner"], true, Some(5))]
    #[case::fast(&["art-chart-factory", "--confirmations", "1"], false, Some(1))]
    #[case::no_verify(&["art-chart-factory", "--no-verify"], false, None)]
    fn art_chart_factory_flags(
        #[case] args: &[&str],
        #[case] only_allow_owner: bool,
        #[case] confirmations: Option<u64>,
    ) {
        let Commands::ArtChartFactory(cmd) = parse(args).command else {
            panic!("expected art-chart-factory");
        };
        let params = cmd.params();

        assert_eq!(params.only_allow_owner, only_allow_owner);
        assert_eq!(params.verify.map(|step| step.confirmations), confirmations);
    }

    #[test]
    fn deploy_collects_constructor_args_in_order() {
        let Commands::Deploy(cmd) =
            parse(&["deploy", "--verify", "Token", "My Token", "-5", "0xabc"]).command
        else {
            panic!("expected deploy");
        };
        let plan = cmd.plan();

        assert_eq!(plan.contract, "Token");
        assert_eq!(
            plan.args,
            deploy_driver::ConstructorArgs::Raw(vec![
                "My Token".to_string(),
                "-5".to_string(),
                "0xabc".to_string(),
            ])
        );
        assert_eq!(plan.verify.map(|step| step.confirmations), Some(5));
    }

    #[test]
    fn invalid_address_is_a_usage_error() {
        let result = Cli::try_parse_from(["deployer", "verify", "0x1234", "ArtChartFactory"]);
        assert!(result.is_err());
    }

    #[test]
    fn executes_without_an_ambient_runtime() {
        parse(&["--json", "networks"]).execute().unwrap();
    }

    #[test]
    fn failures_carry_the_command_and_cause() {
        let err = parse(&["-n", "nosuch", "verify", ADDRESS, "ArtChartFactory"])
            .execute()
            .unwrap_err();

        assert_eq!(err.to_string(), "`verify` failed");
        assert!(format!("{err:?}").contains("unknown network `nosuch`"));
    }

    #[test]
    fn poll_interval_uses_humantime() {
        let cli = parse(&["--confirmation-poll-interval", "500ms", "networks"]);
        assert_eq!(cli.global.confirmation_poll_interval, std::time::Duration::from_millis(500));
    }
}
