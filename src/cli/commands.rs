use clap::Subcommand;

use super::policy::PolicyArgs;
use super::replay::ReplayArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Replay a scenario file through the session tracker
    Replay(ReplayArgs),

    /// List the session outcomes and their ordinals
    Outcomes,

    /// Show the effective tracker policy
    Policy(PolicyArgs),
}
