//! Network registry listing.

use clap::Args;
use deploy_config::NetworkConfig;

use crate::flags::GlobalArgs;

/// The networks command.
#[derive(Debug, Clone, Args)]
pub(crate) struct NetworksCommand {}

impl NetworksCommand {
    /// Runs the networks command.
    pub(crate) fn run(&self, global: &GlobalArgs) -> eyre::Result<()> {
        let config = global.load_config()?;
        let networks: Vec<&NetworkConfig> = config.networks.iter().collect();

        global.print(&networks, |networks| {
            println!("{:<16} {:>10}  {:<6} RPC URL", "NAME", "CHAIN ID", "LOCAL");
            for network in networks {
                let url = network.url.as_ref().map_or("(RPC_URL)", |url| url.as_str());
                let local = if network.local { "yes" } else { "no" };
                println!("{:<16} {:>10}  {:<6} {url}", network.name, network.chain_id, local);
            }
        })
    }
}
