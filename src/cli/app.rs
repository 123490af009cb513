use anyhow::Result;
use clap::Parser;
use tracing::{debug, error};

use super::dispatch::dispatch;
use super::env::CliArgs;
use super::runtime::{init_logging, load_policy_for};

pub fn run() -> Result<()> {
    let cli = CliArgs::parse();
    init_logging(&cli.log_level, cli.debug)?;

    debug!(
        version = env!("CARGO_PKG_VERSION"),
        git = env!("GIT_HASH"),
        "autofill-replay starting"
    );

    let policy = load_policy_for(cli.policy.as_deref())?;
    match dispatch(&cli, policy) {
        Ok(()) => Ok(()),
        Err(err) => {
            error!("Command failed: {:#}", err);
            Err(err)
        }
    }
}
