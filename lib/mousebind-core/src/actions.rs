use crate::binding::BindingBuilder;
use crate::platform::{describe_event, EventProperty, EventSource, PlatformResult, RawEvent};
use log::info;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Built-in callbacks that can be attached to a binding from the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Swallow the event
    Block,
    /// Let the event through untouched
    Pass,
    /// Log the event and swallow it
    Log,
    /// Turn drag movement into scrolling
    DragScroll {
        /// Pixels scrolled per pixel dragged (1 to 100)
        #[serde(default = "default_speed")]
        speed: i32,
        /// Content follows the pointer when true
        #[serde(default = "default_natural")]
        natural: bool,
    },
}

pub const MAX_DRAG_SCROLL_SPEED: i32 = 100;

fn default_speed() -> i32 {
    3
}

fn default_natural() -> bool {
    true
}

impl Action {
    pub fn drag_scroll() -> Self {
        Action::DragScroll {
            speed: default_speed(),
            natural: default_natural(),
        }
    }

    /// Rejects settings that can never produce a sensible result
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Action::DragScroll { speed, .. } if !(1..=MAX_DRAG_SCROLL_SPEED).contains(speed) => {
                Err(format!(
                    "drag_scroll speed must be between 1 and {MAX_DRAG_SCROLL_SPEED}, got {speed}"
                ))
            }
            _ => Ok(()),
        }
    }

    /// Attaches this action as the builder's callback
    pub fn attach<'a, S>(&self, builder: BindingBuilder<'a, S>) -> BindingBuilder<'a, S>
    where
        S: EventSource + Clone + Send + Sync,
    {
        match self.clone() {
            Action::Block => builder.callback(|_: &S::Event| true),
            Action::Pass => builder.callback(|_: &S::Event| false),
            Action::Log => builder.callback(|event: &S::Event| {
                info!("{}", describe_event(event));
            }),
            Action::DragScroll { speed, natural } => {
                let source = builder.source().clone();
                builder.callback(move |event: &S::Event| drag_scroll(&source, event, speed, natural))
            }
        }
    }
}

/// Consumes the drag and emits an equivalent scroll. A drag without movement emits nothing.
pub fn drag_scroll<S: EventSource>(
    source: &S,
    event: &S::Event,
    speed: i32,
    natural: bool,
) -> PlatformResult<(bool, Vec<S::Event>)> {
    let dx = event.property(EventProperty::MouseDeltaX);
    let dy = event.property(EventProperty::MouseDeltaY);
    if dx == 0 && dy == 0 {
        return Ok((true, Vec::new()));
    }

    let factor = if natural {
        i64::from(speed)
    } else {
        -i64::from(speed)
    };
    source
        .create_scroll_event(scroll_delta(dy, factor), scroll_delta(dx, factor))
        .map(|scroll| (true, vec![scroll]))
}

/// Scaled delta, saturated to the range a scroll event can carry
fn scroll_delta(delta: i64, factor: i64) -> i32 {
    delta
        .saturating_mul(factor)
        .clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
