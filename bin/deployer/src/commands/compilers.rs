//! Compiler profile listing.

use clap::Args;
use deploy_config::{CompilerProfile, SolcSettings};
use eyre::OptionExt;

use crate::flags::GlobalArgs;

/// The compilers command.
#[derive(Debug, Clone, Args)]
pub(crate) struct CompilersCommand {
    /// Show the profile a source file compiles with, e.g. `contracts/LabelFactory.sol`.
    source: Option<String>,
}

impl CompilersCommand {
    /// Runs the compilers command.
    pub(crate) fn run(&self, global: &GlobalArgs) -> eyre::Result<()> {
        let compilers = global.load_config()?.compilers;

        if let Some(source) = &self.source {
            let profile = compilers.profile_for(source).ok_or_eyre("no compilers configured")?;
            return global.print(profile, |profile| {
                println!("{source}: {}", describe(profile));
            });
        }

        global.print(&compilers, |compilers| {
            for profile in &compilers.compilers {
                println!("{}", describe(profile));
            }
            for (source, profile) in &compilers.overrides {
                println!("{source}: {}", describe(profile));
            }
        })
    }
}

fn describe(profile: &CompilerProfile) -> String {
    let SolcSettings { optimizer, via_ir } = profile.settings;
    let optimizer = if optimizer.enabled {
        format!("optimizer on, {} runs", optimizer.runs)
    } else {
        "optimizer off".to_string()
    };
    let pipeline = if via_ir { ", viaIR" } else { "" };
    format!("solc {} ({optimizer}{pipeline})", profile.version)
}
