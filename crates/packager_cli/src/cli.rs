//! CLI argument parsing with clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

use crate::config::FileConfig;

/// Submit a web application to the packaging service
#[derive(Debug, Parser)]
#[command(
    name = "packager",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Config file (RON); defaults to ./packager.ron when present
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the packaging service
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Endpoint path appended to the base URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Give up on the request after this many seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Collect only the URL, without an app name
    #[arg(long, global = true)]
    pub url_only: bool,

    /// Also write logs to ./packager.log
    #[arg(long, global = true)]
    pub log_file: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit one conversion request and report its outcome
    Submit(SubmitArgs),

    /// Edit the form and submit from a line-based prompt
    Interactive,
}

#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// URL of the web application to package
    #[arg(long, default_value = "")]
    pub url: String,

    /// Name of the generated package
    #[arg(long)]
    pub app_name: Option<String>,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }

    /// Flags that were given, as a config layer over the file.
    pub fn overrides(&self) -> FileConfig {
        FileConfig {
            base_url: self.base_url.clone(),
            endpoint: self.endpoint.clone(),
            collect_app_name: self.url_only.then_some(false),
            request_timeout_secs: self.timeout_secs,
            log_to_file: self.log_file.then_some(true),
        }
    }
}
