pub use error::*;
pub use event_type::*;
pub use modifiers::*;
pub use outcome::*;

mod error;
mod event_type;
mod modifiers;
mod outcome;

use crate::platform::{
    default_notifier, EventSource, EventTap, Notifier, RawEvent, TapHandler, TapResponse,
};
use log::{debug, error, trace};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, Weak};

/// Shown on screen when a callback fails and its binding turns itself off.
pub const FAULT_MESSAGE: &str = "Error executing binding, disabling";

pub type Callback<E> = Arc<dyn Fn(&E) -> Result<CallbackOutcome<E>, CallbackFault> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    Enabled,
    Disabled,
}

/// Intercepts one event type under an exact set of modifiers and hands it to a callback.
///
/// A binding is created disabled. Each matching event is consumed unless the callback says
/// otherwise, and a callback that fails disables its binding.
pub struct Binding<S: EventSource> {
    shared: Arc<BindingShared<S>>,
}

struct BindingShared<S: EventSource> {
    modifiers: Modifiers,
    event_type: EventType,
    message: Option<String>,
    callback: Callback<S::Event>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<BindingState>,
    tap: OnceLock<S::Tap>,
}

impl<S: EventSource> Binding<S> {
    pub fn builder<'a>(
        source: &'a S,
        modifiers: impl IntoModifiers,
        event_type: &str,
    ) -> BindingBuilder<'a, S> {
        BindingBuilder {
            source,
            modifiers: modifiers.into_modifiers(),
            event_type: event_type.to_string(),
            message: None,
            callback: None,
            notifier: None,
        }
    }

    pub fn create<F, R>(
        source: &S,
        modifiers: impl IntoModifiers,
        event_type: &str,
        message: Option<&str>,
        callback: F,
    ) -> BindingResult<Self>
    where
        F: Fn(&S::Event) -> R + Send + Sync + 'static,
        R: IntoOutcome<S::Event>,
    {
        let mut builder = Self::builder(source, modifiers, event_type).callback(callback);
        if let Some(message) = message {
            builder = builder.message(message);
        }
        builder.build()
    }

    /// Starts intercepting. Calling it on an enabled binding does nothing.
    pub fn enable(&self) -> &Self {
        self.shared.enable();
        self
    }

    /// Stops intercepting. Safe to call from inside this binding's own callback.
    pub fn disable(&self) -> &Self {
        self.shared.disable();
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.shared.is_enabled()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.shared.modifiers
    }

    pub fn event_type(&self) -> EventType {
        self.shared.event_type
    }

    pub fn message(&self) -> Option<&str> {
        self.shared.message.as_deref()
    }
}

impl<S: EventSource> Drop for Binding<S> {
    fn drop(&mut self) {
        self.shared.disable();
    }
}

impl<S: EventSource> fmt::Display for Binding<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.shared.fmt(f)
    }
}

impl<S: EventSource> fmt::Debug for Binding<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("modifiers", &self.shared.modifiers)
            .field("event_type", &self.shared.event_type)
            .field("message", &self.shared.message)
            .field("state", &*self.shared.state())
            .finish()
    }
}

impl<S: EventSource> BindingShared<S> {
    fn state(&self) -> MutexGuard<'_, BindingState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_enabled(&self) -> bool {
        *self.state() == BindingState::Enabled
    }

    fn enable(&self) {
        let mut state = self.state();
        if *state == BindingState::Enabled {
            return;
        }
        let Some(tap) = self.tap.get() else {
            return;
        };
        match tap.start() {
            Ok(()) => {
                *state = BindingState::Enabled;
                debug!("Enabled binding {self}");
            }
            Err(e) => error!("Failed to enable binding {self}: {e}"),
        }
    }

    fn disable(&self) {
        let mut state = self.state();
        if *state == BindingState::Disabled {
            return;
        }
        if let Some(tap) = self.tap.get() {
            if let Err(e) = tap.stop() {
                error!("Failed to stop event tap for binding {self}: {e}");
            }
        }
        *state = BindingState::Disabled;
        debug!("Disabled binding {self}");
    }

    fn dispatch(&self, event: S::Event) -> TapResponse<S::Event> {
        // An event that was already in flight when the tap was stopped
        if !self.is_enabled() {
            return TapResponse::propagate();
        }

        let modifiers = event.modifiers();
        let event_type = event.event_type();
        if event_type != self.event_type || modifiers != self.modifiers {
            trace!("{self} ignoring {event_type} with [{modifiers}]");
            return TapResponse::propagate();
        }

        if let Some(message) = &self.message {
            self.notifier.show(message);
        }

        let callback = &self.callback;
        let result = panic::catch_unwind(AssertUnwindSafe(|| callback(&event)))
            .unwrap_or_else(|payload| Err(CallbackFault::from_panic(payload)));

        match result {
            Ok(outcome) => {
                let response = outcome.resolve(DEFAULT_CONSUME);
                trace!(
                    "{self} handled {event_type}: consume={}, emit={}",
                    response.consume,
                    response.emit.len()
                );
                response
            }
            Err(fault) => {
                error!("Error executing binding {self}: {fault}");
                self.notifier.show(FAULT_MESSAGE);
                self.disable();
                TapResponse::consume()
            }
        }
    }
}

impl<S: EventSource> fmt::Display for BindingShared<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.any() {
            write!(f, "{}+{}", self.modifiers, self.event_type)
        } else {
            write!(f, "{}", self.event_type)
        }
    }
}

pub struct BindingBuilder<'a, S: EventSource> {
    source: &'a S,
    modifiers: Modifiers,
    event_type: String,
    message: Option<String>,
    callback: Option<Callback<S::Event>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl<'a, S: EventSource> BindingBuilder<'a, S> {
    pub fn source(&self) -> &'a S {
        self.source
    }

    /// Text shown each time the binding fires
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Defaults to the platform's notifier
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn callback<F, R>(mut self, callback: F) -> Self
    where
        F: Fn(&S::Event) -> R + Send + Sync + 'static,
        R: IntoOutcome<S::Event>,
    {
        self.callback = Some(Arc::new(move |event: &S::Event| {
            callback(event).into_outcome()
        }));
        self
    }

    /// Validates the binding and creates its (stopped) event tap.
    pub fn build(self) -> BindingResult<Binding<S>> {
        let Some(event_type) = EventType::from_name(&self.event_type) else {
            error!("Unrecognized event type '{}'", self.event_type);
            return Err(BindingError::UnrecognizedEventType(self.event_type));
        };
        let Some(callback) = self.callback else {
            error!(
                "Binding for {}+{event_type} has no callback",
                self.modifiers
            );
            return Err(BindingError::MissingCallback);
        };

        let shared = Arc::new(BindingShared {
            modifiers: self.modifiers,
            event_type,
            message: self.message,
            callback,
            notifier: self.notifier.unwrap_or_else(default_notifier),
            state: Mutex::new(BindingState::Disabled),
            tap: OnceLock::new(),
        });

        let weak: Weak<BindingShared<S>> = Arc::downgrade(&shared);
        let handler: TapHandler<S::Event> =
            Box::new(move |event: S::Event| match weak.upgrade() {
                Some(shared) => shared.dispatch(event),
                None => TapResponse::propagate(),
            });

        let tap = self.source.create_tap(&[event_type], handler).map_err(|e| {
            error!("Failed to create event tap for {event_type}: {e}");
            BindingError::from(e)
        })?;
        // The cell was created empty just above
        let _ = shared.tap.set(tap);

        Ok(Binding { shared })
    }
}
