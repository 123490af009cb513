pub mod cli;
pub mod scenario;

pub use scenario::{load_scenario, run_scenario, ReplayOutcome, Scenario, Step};
