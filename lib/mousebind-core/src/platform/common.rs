use std::backtrace::Backtrace;
use std::fmt;
use std::fmt::Debug;

use crate::binding::Modifiers;
use crate::platform::RawEvent;

#[derive(Debug)]
pub struct PlatformError {
    pub error_type: PlatformErrorType,
    pub backtrace: Backtrace,
}

#[derive(Debug)]
pub enum PlatformErrorType {
    Unknown,
    Error(String),
}

impl From<PlatformErrorType> for PlatformError {
    fn from(error_type: PlatformErrorType) -> Self {
        Self {
            error_type,
            backtrace: Backtrace::capture(),
        }
    }
}

impl From<&str> for PlatformError {
    fn from(error: &str) -> Self {
        PlatformErrorType::Error(error.to_string()).into()
    }
}

impl From<String> for PlatformError {
    fn from(error: String) -> Self {
        PlatformErrorType::Error(error).into()
    }
}

impl From<()> for PlatformError {
    fn from(_: ()) -> Self {
        PlatformErrorType::Unknown.into()
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_type {
            PlatformErrorType::Unknown => write!(f, "unknown platform error"),
            PlatformErrorType::Error(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for PlatformError {}

pub type PlatformResult<T> = Result<T, PlatformError>;

/// Integer fields that can be read from or written to a raw event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventProperty {
    MouseDeltaX,
    MouseDeltaY,
    ButtonNumber,
    ClickState,
    ScrollDeltaAxis1,
    ScrollDeltaAxis2,
    ScrollPointDeltaAxis1,
    ScrollPointDeltaAxis2,
}

impl EventProperty {
    pub const ALL: [EventProperty; 8] = [
        EventProperty::MouseDeltaX,
        EventProperty::MouseDeltaY,
        EventProperty::ButtonNumber,
        EventProperty::ClickState,
        EventProperty::ScrollDeltaAxis1,
        EventProperty::ScrollDeltaAxis2,
        EventProperty::ScrollPointDeltaAxis1,
        EventProperty::ScrollPointDeltaAxis2,
    ];
}

/// What the event source should do with an event after a handler has seen it.
#[derive(Debug, Clone, PartialEq)]
pub struct TapResponse<E> {
    /// Remove the original event from the input stream
    pub consume: bool,
    /// Events to post after the original, whether or not it was consumed
    pub emit: Vec<E>,
}

impl<E> TapResponse<E> {
    pub fn propagate() -> Self {
        Self {
            consume: false,
            emit: Vec::new(),
        }
    }

    pub fn consume() -> Self {
        Self {
            consume: true,
            emit: Vec::new(),
        }
    }
}

/// Summary of an event for log lines.
pub fn describe_event<E: RawEvent>(event: &E) -> String {
    let mut parts = vec![event.event_type().name().to_string()];
    let modifiers: Modifiers = event.modifiers();
    if modifiers.any() {
        parts.push(format!("[{modifiers}]"));
    }
    for property in EventProperty::ALL {
        let value = event.property(property);
        if value != 0 {
            parts.push(format!("{property:?}={value}"));
        }
    }
    parts.join(" ")
}

