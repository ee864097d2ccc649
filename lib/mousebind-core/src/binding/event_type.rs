use std::fmt;

/// Input event types understood by the event source. Discriminants are the platform identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum EventType {
    LeftMouseDown = 1,
    LeftMouseUp = 2,
    RightMouseDown = 3,
    RightMouseUp = 4,
    MouseMoved = 5,
    LeftMouseDragged = 6,
    RightMouseDragged = 7,
    KeyDown = 10,
    KeyUp = 11,
    FlagsChanged = 12,
    ScrollWheel = 22,
    TabletPointer = 23,
    TabletProximity = 24,
    OtherMouseDown = 25,
    OtherMouseUp = 26,
    OtherMouseDragged = 27,
}

static EVENT_TYPES: [(&str, EventType); 16] = [
    ("leftMouseDown", EventType::LeftMouseDown),
    ("leftMouseUp", EventType::LeftMouseUp),
    ("rightMouseDown", EventType::RightMouseDown),
    ("rightMouseUp", EventType::RightMouseUp),
    ("mouseMoved", EventType::MouseMoved),
    ("leftMouseDragged", EventType::LeftMouseDragged),
    ("rightMouseDragged", EventType::RightMouseDragged),
    ("keyDown", EventType::KeyDown),
    ("keyUp", EventType::KeyUp),
    ("flagsChanged", EventType::FlagsChanged),
    ("scrollWheel", EventType::ScrollWheel),
    ("tabletPointer", EventType::TabletPointer),
    ("tabletProximity", EventType::TabletProximity),
    ("otherMouseDown", EventType::OtherMouseDown),
    ("otherMouseUp", EventType::OtherMouseUp),
    ("otherMouseDragged", EventType::OtherMouseDragged),
];

impl EventType {
    /// Looks up a type by its table name, ignoring ASCII case
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        EVENT_TYPES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, t)| *t)
    }

    pub fn from_id(id: u32) -> Option<Self> {
        EVENT_TYPES
            .iter()
            .find(|(_, t)| t.id() == id)
            .map(|(_, t)| *t)
    }

    pub fn id(&self) -> u32 {
        *self as u32
    }

    pub fn name(&self) -> &'static str {
        EVENT_TYPES
            .iter()
            .find(|(_, t)| t == self)
            .map(|(n, _)| *n)
            .unwrap_or("unknown")
    }

    pub fn all() -> impl Iterator<Item = EventType> {
        EVENT_TYPES.iter().map(|(_, t)| *t)
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        EVENT_TYPES.iter().map(|(n, _)| *n)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
