use crate::binding::{EventType, IntoModifiers, Modifiers};
use crate::platform::{
    EventProperty, EventSource, EventTap, Notifier, PlatformResult, RawEvent, TapHandler,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

#[derive(Debug, Clone, PartialEq)]
pub struct MockEvent {
    pub event_type: EventType,
    pub modifiers: Modifiers,
    pub properties: HashMap<EventProperty, i64>,
}

impl MockEvent {
    pub fn new(event_type: EventType, modifiers: impl IntoModifiers) -> Self {
        Self {
            event_type,
            modifiers: modifiers.into_modifiers(),
            properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, property: EventProperty, value: i64) -> Self {
        self.properties.insert(property, value);
        self
    }
}

impl RawEvent for MockEvent {
    fn event_type(&self) -> EventType {
        self.event_type
    }

    fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    fn property(&self, property: EventProperty) -> i64 {
        self.properties.get(&property).copied().unwrap_or(0)
    }

    fn set_property(&mut self, property: EventProperty, value: i64) {
        self.properties.insert(property, value);
    }
}

/// Result of pushing one event through the mock source.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    /// False if some tap consumed the event
    pub propagated: bool,
    pub emitted: Vec<MockEvent>,
}

struct MockTapEntry {
    id: u64,
    types: Vec<EventType>,
    running: Arc<AtomicBool>,
    handler: Arc<TapHandler<MockEvent>>,
}

#[derive(Default)]
struct MockSourceInner {
    taps: Mutex<Vec<MockTapEntry>>,
    next_id: AtomicU64,
    fail_create: AtomicBool,
    fail_start: AtomicBool,
}

impl MockSourceInner {
    fn taps(&self) -> MutexGuard<'_, Vec<MockTapEntry>> {
        self.taps.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// An in-process event source. Events are delivered synchronously by `deliver`.
#[derive(Clone, Default)]
pub struct MockEventSource {
    inner: Arc<MockSourceInner>,
}

impl MockEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes the event to running taps in creation order until one consumes it.
    pub fn deliver(&self, event: MockEvent) -> Delivery {
        self.route(event, false)
    }

    /// Like `deliver`, but also reaches stopped taps, as an event already queued when its tap
    /// was stopped would.
    pub fn deliver_in_flight(&self, event: MockEvent) -> Delivery {
        self.route(event, true)
    }

    fn route(&self, event: MockEvent, include_stopped: bool) -> Delivery {
        let candidates: Vec<(Arc<AtomicBool>, Arc<TapHandler<MockEvent>>)> = self
            .inner
            .taps()
            .iter()
            .filter(|entry| entry.types.contains(&event.event_type))
            .map(|entry| (entry.running.clone(), entry.handler.clone()))
            .collect();

        let mut delivery = Delivery {
            propagated: true,
            emitted: Vec::new(),
        };
        for (running, handler) in candidates {
            if !include_stopped && !running.load(Ordering::SeqCst) {
                continue;
            }
            let response = handler(event.clone());
            delivery.emitted.extend(response.emit);
            if response.consume {
                delivery.propagated = false;
                break;
            }
        }
        delivery
    }

    pub fn tap_count(&self) -> usize {
        self.inner.taps().len()
    }

    pub fn running_tap_count(&self) -> usize {
        self.inner
            .taps()
            .iter()
            .filter(|entry| entry.running.load(Ordering::SeqCst))
            .count()
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.inner.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_start(&self, fail: bool) {
        self.inner.fail_start.store(fail, Ordering::SeqCst);
    }
}

impl EventSource for MockEventSource {
    type Event = MockEvent;
    type Tap = MockTap;

    fn create_tap(
        &self,
        types: &[EventType],
        handler: TapHandler<MockEvent>,
    ) -> PlatformResult<MockTap> {
        if self.inner.fail_create.load(Ordering::SeqCst) {
            return Err("Mock tap creation failed".into());
        }

        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        let running = Arc::new(AtomicBool::new(false));
        self.inner.taps().push(MockTapEntry {
            id,
            types: types.to_vec(),
            running: running.clone(),
            handler: Arc::new(handler),
        });

        Ok(MockTap {
            id,
            running,
            source: Arc::downgrade(&self.inner),
        })
    }

    fn create_scroll_event(&self, vertical: i32, horizontal: i32) -> PlatformResult<MockEvent> {
        Ok(MockEvent::new(EventType::ScrollWheel, Modifiers::default())
            .with_property(EventProperty::ScrollPointDeltaAxis1, vertical as i64)
            .with_property(EventProperty::ScrollPointDeltaAxis2, horizontal as i64))
    }
}

pub struct MockTap {
    id: u64,
    running: Arc<AtomicBool>,
    source: Weak<MockSourceInner>,
}

impl EventTap for MockTap {
    fn start(&self) -> PlatformResult<()> {
        let fail = self
            .source
            .upgrade()
            .map(|inner| inner.fail_start.load(Ordering::SeqCst))
            .unwrap_or(false);
        if fail {
            return Err("Mock tap failed to start".into());
        }
        self.running.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&self) -> PlatformResult<()> {
        self.running.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for MockTap {
    fn drop(&mut self) {
        if let Some(inner) = self.source.upgrade() {
            inner.taps().retain(|entry| entry.id != self.id);
        }
    }
}

/// Records every message instead of displaying it.
#[derive(Default)]
pub struct MockNotifier {
    messages: Mutex<Vec<String>>,
}

impl MockNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

impl Notifier for MockNotifier {
    fn show(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}
