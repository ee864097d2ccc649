use crate::binding::{EventType, Modifiers};
use crate::platform::{EventProperty, RawEvent};
use core_graphics::event::{CGEvent, CGEventField, CGEventFlags, EventField};

pub struct MacOSEvent {
    event_type: EventType,
    pub(crate) inner: CGEvent,
}

impl MacOSEvent {
    pub fn new(event_type: EventType, inner: CGEvent) -> Self {
        Self { event_type, inner }
    }
}

fn field(property: EventProperty) -> CGEventField {
    match property {
        EventProperty::MouseDeltaX => EventField::MOUSE_EVENT_DELTA_X,
        EventProperty::MouseDeltaY => EventField::MOUSE_EVENT_DELTA_Y,
        EventProperty::ButtonNumber => EventField::MOUSE_EVENT_BUTTON_NUMBER,
        EventProperty::ClickState => EventField::MOUSE_EVENT_CLICK_STATE,
        EventProperty::ScrollDeltaAxis1 => EventField::SCROLL_WHEEL_EVENT_DELTA_AXIS_1,
        EventProperty::ScrollDeltaAxis2 => EventField::SCROLL_WHEEL_EVENT_DELTA_AXIS_2,
        EventProperty::ScrollPointDeltaAxis1 => EventField::SCROLL_WHEEL_EVENT_POINT_DELTA_AXIS_1,
        EventProperty::ScrollPointDeltaAxis2 => EventField::SCROLL_WHEEL_EVENT_POINT_DELTA_AXIS_2,
    }
}

impl RawEvent for MacOSEvent {
    fn event_type(&self) -> EventType {
        self.event_type
    }

    fn modifiers(&self) -> Modifiers {
        let flags = self.inner.get_flags();
        Modifiers {
            cmd: flags.contains(CGEventFlags::CGEventFlagCommand),
            ctrl: flags.contains(CGEventFlags::CGEventFlagControl),
            alt: flags.contains(CGEventFlags::CGEventFlagAlternate),
            shift: flags.contains(CGEventFlags::CGEventFlagShift),
        }
    }

    fn property(&self, property: EventProperty) -> i64 {
        self.inner.get_integer_value_field(field(property))
    }

    fn set_property(&mut self, property: EventProperty, value: i64) {
        self.inner.set_integer_value_field(field(property), value);
    }
}
