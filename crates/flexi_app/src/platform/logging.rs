//! Logging setup for the terminal front end.
//!
//! Defaults to `./flexiconnect.log` so log lines never interleave with the
//! rendered panels.

use std::path::PathBuf;

use clap::ValueEnum;
use flexi_logging::{LevelFilter, LogDestination};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    /// stderr only.
    Terminal,
    /// Log file only.
    File,
    /// stderr and log file.
    Both,
}

pub fn destination(target: LogTarget, log_file: PathBuf) -> LogDestination {
    match target {
        LogTarget::Terminal => LogDestination::Terminal,
        LogTarget::File => LogDestination::File(log_file),
        LogTarget::Both => LogDestination::Both(log_file),
    }
}

pub fn initialize(target: LogTarget, log_file: PathBuf, verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if !flexi_logging::initialize(destination(target, log_file), level) {
        eprintln!("Warning: logging is disabled");
    }
}
