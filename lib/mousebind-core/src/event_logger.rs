use crate::binding::EventType;
use crate::platform::{describe_event, EventSource, EventTap, PlatformResult, TapResponse};
use log::{debug, info};

/// Logs every event of the given types without ever consuming them.
pub struct EventLogger<S: EventSource> {
    tap: S::Tap,
    types: Vec<EventType>,
}

impl<S: EventSource> EventLogger<S> {
    /// Watches every known event type
    pub fn new(source: &S) -> PlatformResult<Self> {
        Self::with_types(source, EventType::all().collect())
    }

    pub fn with_types(source: &S, types: Vec<EventType>) -> PlatformResult<Self> {
        let tap = source.create_tap(
            &types,
            Box::new(|event: S::Event| {
                debug!("{}", describe_event(&event));
                TapResponse::propagate()
            }),
        )?;
        Ok(Self { tap, types })
    }

    pub fn start(&self) -> PlatformResult<()> {
        self.tap.start()?;
        info!("Logging {} event types", self.types.len());
        Ok(())
    }

    pub fn stop(&self) -> PlatformResult<()> {
        self.tap.stop()
    }

    pub fn is_running(&self) -> bool {
        self.tap.is_running()
    }

    pub fn types(&self) -> &[EventType] {
        &self.types
    }
}
