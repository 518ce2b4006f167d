//! morastr CLI library
//!
//! Command-line front end for the morastr mora counter.

pub mod commands;
pub mod error;
pub mod input;
pub mod output;

pub use error::{CliError, CliResult};

/// Initialize logging based on verbosity level
///
/// Core events are emitted through `tracing` with its `log` bridge, so the
/// same filter applies to them.
pub fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // A logger may already be installed when embedded in tests
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}
