pub mod backup;
pub mod cli;
pub mod config;
pub mod credential;
pub mod error;
pub mod launch;
pub mod logging;
pub mod mount;
pub mod snapshot;
pub mod types;
pub mod util;

#[cfg(test)]
mod testing;

pub use error::{LaunchError, Result};
pub use launch::run_once;
pub use types::{ExitCode, RunMode};
