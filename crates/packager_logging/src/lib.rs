#![deny(missing_docs)]
//! Shared logging utilities for the packager workspace.
//!
//! Every crate logs through the `packager_*` macros, which tag records with
//! [`LOG_TARGET`]. The installed loggers only accept that target, so
//! dependency chatter (reqwest, hyper, wiremock) stays out of the output.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Default log file, relative to the current working directory.
pub const DEFAULT_LOG_FILE: &str = "./packager.log";

/// Target attached to every record emitted through the `packager_*` macros.
pub const LOG_TARGET: &str = "packager";

/// Emits a record under [`LOG_TARGET`]; the level macros below expand to this.
#[doc(hidden)]
#[macro_export]
macro_rules! __packager_log {
    ($level:expr, $($arg:tt)+) => {
        log::log!(target: $crate::LOG_TARGET, $level, $($arg)+)
    };
}

/// Info-level record: lifecycle and request outcomes.
#[macro_export]
macro_rules! packager_info {
    ($($arg:tt)+) => { $crate::__packager_log!(log::Level::Info, $($arg)+) };
}

/// Debug-level record: reducer decisions and transport detail.
#[macro_export]
macro_rules! packager_debug {
    ($($arg:tt)+) => { $crate::__packager_log!(log::Level::Debug, $($arg)+) };
}

/// Warn-level record: rejected or unreachable submissions.
#[macro_export]
macro_rules! packager_warn {
    ($($arg:tt)+) => { $crate::__packager_log!(log::Level::Warn, $($arg)+) };
}

/// Error-level record.
#[macro_export]
macro_rules! packager_error {
    ($($arg:tt)+) => { $crate::__packager_log!(log::Level::Error, $($arg)+) };
}

/// Destination for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to the given file, truncating it first.
    File(PathBuf),
    /// Write to the terminal (stderr for warnings and errors).
    Terminal,
    /// Write to both the file and the terminal.
    Both(PathBuf),
}

/// Initialize the global logger.
///
/// Safe to call more than once; only the first call installs a logger.
/// A file that cannot be created is reported on stderr and skipped.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = build_config();

    let loggers: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::File(path) => match create_file_logger(&path, level, config) {
            Some(file_logger) => vec![file_logger],
            None => return,
        },
        LogDestination::Terminal => {
            vec![TermLogger::new(
                level,
                config,
                TerminalMode::Mixed,
                ColorChoice::Auto,
            )]
        }
        LogDestination::Both(path) => {
            let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
                level,
                config.clone(),
                TerminalMode::Mixed,
                ColorChoice::Auto,
            )];
            if let Some(file_logger) = create_file_logger(&path, level, config) {
                loggers.push(file_logger);
            }
            loggers
        }
    };

    let _ = CombinedLogger::init(loggers);
}

/// Terminal logger for test binaries, at debug level in debug builds.
///
/// Every test may call it; only the first call in a process installs anything.
pub fn initialize_for_tests() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    initialize(LogDestination::Terminal, level);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .add_filter_allow_str(LOG_TARGET)
        .build()
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}
