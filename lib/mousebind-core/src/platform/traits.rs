use crate::binding::{EventType, Modifiers};
use crate::platform::{EventProperty, PlatformResult, TapResponse};

/// Called by a tap once per delivered event, on the event source's delivery path.
pub type TapHandler<E> = Box<dyn Fn(E) -> TapResponse<E> + Send + Sync>;

/// A raw input event as delivered by an event source.
pub trait RawEvent
where
    Self: Sized + 'static,
{
    fn event_type(&self) -> EventType;

    /// Only command, control, option and shift are reported. Any other device flag is dropped.
    fn modifiers(&self) -> Modifiers;

    /// Missing or inapplicable fields read as zero.
    fn property(&self, property: EventProperty) -> i64;

    fn set_property(&mut self, property: EventProperty, value: i64);
}

pub trait EventSource
where
    Self: Sized + 'static,
{
    type Event: RawEvent;
    type Tap: EventTap;

    /// Creates a tap that only sees events whose type is in `types`. The tap must not deliver any
    /// events until `start` is called.
    fn create_tap(
        &self,
        types: &[EventType],
        handler: TapHandler<Self::Event>,
    ) -> PlatformResult<Self::Tap>;

    /// Creates a pixel based scroll event suitable for re-emitting from a tap handler.
    fn create_scroll_event(&self, vertical: i32, horizontal: i32) -> PlatformResult<Self::Event>;
}

/// A single subscription to an event source. Dropping the tap releases it.
pub trait EventTap
where
    Self: Sized + Send + Sync,
{
    fn start(&self) -> PlatformResult<()>;

    /// Must be callable from inside this tap's own handler.
    fn stop(&self) -> PlatformResult<()>;

    fn is_running(&self) -> bool;
}

/// On-screen message display. Failures are swallowed by the implementation.
pub trait Notifier
where
    Self: Send + Sync,
{
    fn show(&self, message: &str);
}
