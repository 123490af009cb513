pub mod app;
pub mod commands;
pub mod dispatch;
pub mod env;
pub mod outcomes;
pub mod output;
pub mod policy;
pub mod replay;
pub mod runtime;

pub use outcomes::cmd_outcomes;
pub use policy::{cmd_policy, PolicyArgs};
pub use replay::{cmd_replay, ReplayArgs};
