use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "mousebind",
    version = mousebind_core::version(),
    about = "Mousebind - Rebind mouse events under exact modifier combinations",
)]
pub struct Args {
    /// Specify custom configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Validate configuration and exit without starting
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Use default configuration and ignore config files
    #[arg(long = "defaults")]
    pub use_defaults: bool,

    /// Only log info, warnings and errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log everything, including every event the bindings ignore
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Log every input event, overriding the config file
    #[arg(long = "debug-events")]
    pub debug_events: bool,
}

pub fn parse_args() -> Args {
    Args::parse()
}
