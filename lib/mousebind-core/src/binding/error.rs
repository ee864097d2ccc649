use crate::platform::PlatformError;
use std::any::Any;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindingError {
    #[error("Unrecognized event type '{0}'")]
    UnrecognizedEventType(String),
    #[error("A binding requires a callback")]
    MissingCallback,
    #[error("Invalid action: {0}")]
    InvalidAction(String),
    #[error("Failed to create event tap: {0}")]
    Platform(String),
}

impl From<PlatformError> for BindingError {
    fn from(error: PlatformError) -> Self {
        BindingError::Platform(error.to_string())
    }
}

pub type BindingResult<T> = Result<T, BindingError>;

/// A callback that returned an error or panicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackFault {
    pub message: String,
}

impl CallbackFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "callback panicked".to_string()
        };
        Self::new(message)
    }
}

impl fmt::Display for CallbackFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CallbackFault {}
