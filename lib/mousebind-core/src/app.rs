use crate::binding::Binding;
use crate::binding_set::BindingSet;
use crate::config::Config;
use crate::event_logger::EventLogger;
use crate::platform::{default_notifier, EventSource, Notifier, NullNotifier};
use log::{error, info, warn};
use std::sync::Arc;

pub fn notifier_for(config: &Config) -> Arc<dyn Notifier> {
    if config.notifications {
        default_notifier()
    } else {
        Arc::new(NullNotifier)
    }
}

/// Creates every configured binding. Entries that fail to build are logged and skipped.
pub fn build_bindings<S>(source: &S, config: &Config, notifier: Arc<dyn Notifier>) -> BindingSet<S>
where
    S: EventSource + Clone + Send + Sync,
{
    let mut set = BindingSet::new();
    for entry in &config.bindings {
        let mut builder =
            Binding::builder(source, entry.modifiers, &entry.event).notifier(notifier.clone());
        if let Some(message) = &entry.message {
            builder = builder.message(message.clone());
        }
        if let Some(action) = &entry.action {
            if let Err(e) = action.validate() {
                warn!("Skipping binding '{}': {e}", entry.name);
                continue;
            }
            builder = action.attach(builder);
        }

        match builder.build() {
            Ok(binding) => {
                if entry.enabled {
                    binding.enable();
                }
                info!("Loaded binding '{}' ({binding})", entry.name);
                set.insert(entry.name.clone(), binding);
            }
            Err(e) => warn!("Skipping binding '{}': {e}", entry.name),
        }
    }
    set
}

/// The live bindings and optional event logger for one event source.
pub struct Session<S: EventSource + Clone + Send + Sync> {
    source: S,
    bindings: BindingSet<S>,
    event_logger: Option<EventLogger<S>>,
}

impl<S: EventSource + Clone + Send + Sync> Session<S> {
    pub fn new(source: S, config: &Config) -> Self {
        let mut session = Self {
            source,
            bindings: BindingSet::new(),
            event_logger: None,
        };
        session.apply(config);
        session
    }

    /// Replaces every binding with the ones described by `config`
    pub fn apply(&mut self, config: &Config) {
        // Old taps are released before new ones are created
        self.bindings = BindingSet::new();
        self.event_logger = None;

        self.bindings = build_bindings(&self.source, config, notifier_for(config));
        info!(
            "{} of {} bindings enabled",
            self.bindings.enabled_count(),
            self.bindings.len()
        );

        if config.debug_events {
            match EventLogger::with_types(&self.source, config.debug_event_types()) {
                Ok(logger) => match logger.start() {
                    Ok(()) => self.event_logger = Some(logger),
                    Err(e) => error!("Failed to start event logger: {e}"),
                },
                Err(e) => error!("Failed to create event logger: {e}"),
            }
        }
    }

    pub fn bindings(&self) -> &BindingSet<S> {
        &self.bindings
    }

    pub fn event_logger(&self) -> Option<&EventLogger<S>> {
        self.event_logger.as_ref()
    }
}
