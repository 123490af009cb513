use anyhow::Result;
use autofill_policy_center::TrackerPolicy;

use super::env::CliArgs;
use super::outcomes::cmd_outcomes;
use super::policy::cmd_policy;
use super::replay::cmd_replay;
use crate::cli::commands::Commands;

pub fn dispatch(cli: &CliArgs, policy: TrackerPolicy) -> Result<()> {
    let output = cli.output.clone();
    match cli.command.clone() {
        Commands::Replay(args) => cmd_replay(args, policy, output),
        Commands::Outcomes => cmd_outcomes(output),
        Commands::Policy(args) => cmd_policy(args, &policy, output),
    }
}
