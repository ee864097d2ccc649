use crate::config::Config;
use crate::platform::PlatformError;
use std::sync::atomic::AtomicBool;
use std::sync::{mpsc, Arc};

pub mod actions;
pub mod app;
pub mod binding;
pub mod binding_set;
pub mod config;
pub mod event_logger;
pub mod paths;
pub mod platform;

pub use binding::{Binding, BindingBuilder, BindingError, EventType, Modifier, Modifiers};
pub use binding_set::BindingSet;

pub fn version() -> &'static str {
    option_env!("VERSION").unwrap_or("v0.0.0-dev")
}

/// Installs the configured bindings and runs the input event loop on the calling thread until
/// `shutdown` is set. Configs received on `reloads` replace the running bindings.
#[cfg(target_os = "macos")]
pub fn start(
    shutdown: Arc<AtomicBool>,
    config: Config,
    reloads: mpsc::Receiver<Config>,
) -> MousebindResult<()> {
    use crate::app::Session;
    use crate::platform::{run_event_loop, MacOSEventSource};

    let mut session = Session::new(MacOSEventSource::new(), &config);
    log::info!("Mousebind {} running", version());

    run_event_loop(&shutdown, || {
        while let Ok(config) = reloads.try_recv() {
            log::info!("Reloading bindings");
            session.apply(&config);
        }
    });

    session.bindings().disable_all();
    Ok(())
}

#[cfg(not(target_os = "macos"))]
pub fn start(
    _shutdown: Arc<AtomicBool>,
    _config: Config,
    _reloads: mpsc::Receiver<Config>,
) -> MousebindResult<()> {
    Err("No input event source is available on this platform".into())
}

#[derive(Debug)]
pub enum MousebindFatalError {
    Error(String),
    PlatformError(PlatformError),
}

pub type MousebindResult<T> = Result<T, MousebindFatalError>;

impl From<PlatformError> for MousebindFatalError {
    fn from(error: PlatformError) -> Self {
        MousebindFatalError::PlatformError(error)
    }
}

impl From<&str> for MousebindFatalError {
    fn from(value: &str) -> Self {
        MousebindFatalError::Error(value.to_owned())
    }
}

impl From<String> for MousebindFatalError {
    fn from(error: String) -> Self {
        MousebindFatalError::Error(error)
    }
}

impl std::fmt::Display for MousebindFatalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MousebindFatalError::Error(message) => write!(f, "{message}"),
            MousebindFatalError::PlatformError(e) => write!(f, "{e}"),
        }
    }
}
