use log::{error, info, warn};
use mousebind_core::config::Config;
use mousebind_core::MousebindResult;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};

mod cli;
mod config_watcher;
mod error_dialog;
mod logger;

use cli::Args;
use config_watcher::ConfigWatcher;

fn main() -> ExitCode {
    let args = cli::parse_args();
    if let Err(e) = logger::init_logger(args.quiet, args.verbose) {
        eprintln!("Failed to initialize logger: {e}");
    }

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e}");
            if !args.dry_run {
                error_dialog::show_error(&e);
            }
            ExitCode::FAILURE
        }
    }
}

/// Returns false when a dry run found invalid bindings
fn run(args: &Args) -> MousebindResult<bool> {
    let mut config = if args.use_defaults {
        info!("Using default configuration");
        Config::default()
    } else {
        Config::load(args.config_path.as_deref(), !args.dry_run).map_err(|e| e.to_string())?
    };
    config.debug_events |= args.debug_events;

    let problems = config.validate();
    for (name, e) in &problems {
        warn!("Binding '{name}': {e}");
    }

    if args.dry_run {
        if problems.is_empty() {
            info!("Configuration is valid ({} bindings)", config.bindings.len());
        } else {
            error!("{} invalid binding(s)", problems.len());
        }
        return Ok(problems.is_empty());
    }

    info!("Starting Mousebind {}", mousebind_core::version());

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();
    ctrlc::set_handler(move || {
        info!("Received Ctrl+C, shutting down...");
        shutdown_clone.store(true, Ordering::SeqCst);
    })
    .map_err(|e| format!("Error setting Ctrl+C handler: {e}"))?;

    let (tx, reloads) = mpsc::channel();
    let _watcher = match &config.config_path {
        Some(path) if !args.use_defaults => ConfigWatcher::new(path, args.debug_events, tx)
            .map_err(|e| warn!("Config hot reload disabled: {e}"))
            .ok(),
        _ => None,
    };

    mousebind_core::start(shutdown, config, reloads)?;

    info!("Mousebind stopped");
    Ok(true)
}
