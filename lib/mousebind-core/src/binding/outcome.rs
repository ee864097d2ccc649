use crate::binding::CallbackFault;
use crate::platform::TapResponse;
use std::fmt::Display;

/// Consume is the default: a binding that fired and said nothing handled the event.
pub const DEFAULT_CONSUME: bool = true;

/// What a callback reported, before defaults are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackOutcome<E> {
    /// `None` when the callback did not decide
    pub consume: Option<bool>,
    pub emit: Vec<E>,
}

impl<E> CallbackOutcome<E> {
    pub fn undecided() -> Self {
        Self {
            consume: None,
            emit: Vec::new(),
        }
    }

    pub fn decided(consume: bool) -> Self {
        Self {
            consume: Some(consume),
            emit: Vec::new(),
        }
    }

    pub fn with_events(mut self, events: Vec<E>) -> Self {
        self.emit = events;
        self
    }

    /// Fills in a missing decision. Emitted events pass through regardless of the decision.
    pub fn resolve(self, default_consume: bool) -> TapResponse<E> {
        TapResponse {
            consume: self.consume.unwrap_or(default_consume),
            emit: self.emit,
        }
    }
}

impl<E> Default for CallbackOutcome<E> {
    fn default() -> Self {
        Self::undecided()
    }
}

/// Return values a binding callback may produce.
pub trait IntoOutcome<E> {
    fn into_outcome(self) -> Result<CallbackOutcome<E>, CallbackFault>;
}

impl<E> IntoOutcome<E> for CallbackOutcome<E> {
    fn into_outcome(self) -> Result<CallbackOutcome<E>, CallbackFault> {
        Ok(self)
    }
}

impl<E> IntoOutcome<E> for () {
    fn into_outcome(self) -> Result<CallbackOutcome<E>, CallbackFault> {
        Ok(CallbackOutcome::undecided())
    }
}

impl<E> IntoOutcome<E> for bool {
    fn into_outcome(self) -> Result<CallbackOutcome<E>, CallbackFault> {
        Ok(CallbackOutcome::decided(self))
    }
}

impl<E> IntoOutcome<E> for Option<bool> {
    fn into_outcome(self) -> Result<CallbackOutcome<E>, CallbackFault> {
        Ok(CallbackOutcome {
            consume: self,
            emit: Vec::new(),
        })
    }
}

impl<E> IntoOutcome<E> for (bool, Vec<E>) {
    fn into_outcome(self) -> Result<CallbackOutcome<E>, CallbackFault> {
        Ok(CallbackOutcome::decided(self.0).with_events(self.1))
    }
}

/// Events with no decision: the default decision applies
impl<E> IntoOutcome<E> for Vec<E> {
    fn into_outcome(self) -> Result<CallbackOutcome<E>, CallbackFault> {
        Ok(CallbackOutcome::undecided().with_events(self))
    }
}

impl<E, T, F> IntoOutcome<E> for Result<T, F>
where
    T: IntoOutcome<E>,
    F: Display,
{
    fn into_outcome(self) -> Result<CallbackOutcome<E>, CallbackFault> {
        match self {
            Ok(value) => value.into_outcome(),
            Err(e) => Err(CallbackFault::new(e.to_string())),
        }
    }
}
