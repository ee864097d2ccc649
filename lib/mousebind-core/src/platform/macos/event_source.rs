use crate::binding::EventType;
use crate::platform::macos::event::MacOSEvent;
use crate::platform::macos::ffi::{CFMachPortInvalidate, TapPort};
use crate::platform::macos::run_loop::common_modes;
use crate::platform::{EventSource, EventTap, PlatformResult, TapHandler};
use core_foundation::base::TCFType;
use core_foundation::runloop::{CFRunLoop, CFRunLoopSource};
use core_graphics::event::{
    CGEvent, CGEventTap, CGEventTapLocation, CGEventTapOptions, CGEventTapPlacement, CGEventType,
    ScrollEventUnit,
};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
use log::{trace, warn};
use std::cell::{Cell, RefCell};
use std::mem::ManuallyDrop;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

thread_local! {
    /// Depth of tap callbacks currently running on this thread
    static CALLBACK_DEPTH: Cell<usize> = const { Cell::new(0) };
    /// Taps released from inside a callback. Their closures may still be on the stack.
    static RELEASED_TAPS: RefCell<Vec<CGEventTap<'static>>> = const { RefCell::new(Vec::new()) };
}

/// Marks a tap callback as running for as long as it is alive
struct CallbackScope;

impl CallbackScope {
    fn enter() -> Self {
        CALLBACK_DEPTH.with(|depth| depth.set(depth.get() + 1));
        CallbackScope
    }
}

impl Drop for CallbackScope {
    fn drop(&mut self) {
        CALLBACK_DEPTH.with(|depth| depth.set(depth.get() - 1));
    }
}

/// Frees taps that were dropped while one of their callbacks was running. Called by the event
/// loop between run loop slices.
pub(crate) fn release_deferred_taps() {
    if CALLBACK_DEPTH.with(Cell::get) > 0 {
        return;
    }
    let released = RELEASED_TAPS.with(|taps| std::mem::take(&mut *taps.borrow_mut()));
    if !released.is_empty() {
        trace!("Releasing {} deferred event taps", released.len());
    }
}

/// Session level event taps. Taps must be created on the thread that runs the event loop.
#[derive(Clone, Copy, Default)]
pub struct MacOSEventSource;

impl MacOSEventSource {
    pub fn new() -> Self {
        Self
    }
}

fn cg_event_type(event_type: EventType) -> CGEventType {
    match event_type {
        EventType::LeftMouseDown => CGEventType::LeftMouseDown,
        EventType::LeftMouseUp => CGEventType::LeftMouseUp,
        EventType::RightMouseDown => CGEventType::RightMouseDown,
        EventType::RightMouseUp => CGEventType::RightMouseUp,
        EventType::MouseMoved => CGEventType::MouseMoved,
        EventType::LeftMouseDragged => CGEventType::LeftMouseDragged,
        EventType::RightMouseDragged => CGEventType::RightMouseDragged,
        EventType::KeyDown => CGEventType::KeyDown,
        EventType::KeyUp => CGEventType::KeyUp,
        EventType::FlagsChanged => CGEventType::FlagsChanged,
        EventType::ScrollWheel => CGEventType::ScrollWheel,
        EventType::TabletPointer => CGEventType::TabletPointer,
        EventType::TabletProximity => CGEventType::TabletProximity,
        EventType::OtherMouseDown => CGEventType::OtherMouseDown,
        EventType::OtherMouseUp => CGEventType::OtherMouseUp,
        EventType::OtherMouseDragged => CGEventType::OtherMouseDragged,
    }
}

impl EventSource for MacOSEventSource {
    type Event = MacOSEvent;
    type Tap = MacOSTap;

    fn create_tap(
        &self,
        types: &[EventType],
        handler: TapHandler<MacOSEvent>,
    ) -> PlatformResult<MacOSTap> {
        let running = Arc::new(AtomicBool::new(false));
        let port: Arc<OnceLock<TapPort>> = Arc::new(OnceLock::new());
        let mask = types.iter().copied().map(cg_event_type).collect();

        let callback_running = running.clone();
        let callback_port = port.clone();
        let tap = CGEventTap::new(
            CGEventTapLocation::Session,
            CGEventTapPlacement::HeadInsertEventTap,
            CGEventTapOptions::Default,
            mask,
            move |proxy, event_type, event| {
                if matches!(
                    event_type,
                    CGEventType::TapDisabledByTimeout | CGEventType::TapDisabledByUserInput
                ) {
                    if callback_running.load(Ordering::SeqCst) {
                        warn!("Event tap was disabled by the system, re-enabling");
                        if let Some(port) = callback_port.get() {
                            port.set_enabled(true);
                        }
                    }
                    return Some(event.clone());
                }

                if !callback_running.load(Ordering::SeqCst) {
                    return Some(event.clone());
                }
                let Some(event_type) = EventType::from_id(event_type as u32) else {
                    return Some(event.clone());
                };

                let _scope = CallbackScope::enter();
                let response = handler(MacOSEvent::new(event_type, event.clone()));
                for emitted in &response.emit {
                    emitted.inner.post_from_tap(proxy);
                }
                if response.consume {
                    None
                } else {
                    Some(event.clone())
                }
            },
        )?;

        let tap_port = TapPort(tap.mach_port.as_concrete_TypeRef());
        tap_port.set_enabled(false);
        let _ = port.set(tap_port);

        let source = tap.mach_port.create_runloop_source(0)?;
        CFRunLoop::get_current().add_source(&source, common_modes());
        trace!("Created event tap for {types:?}");

        Ok(MacOSTap {
            tap: ManuallyDrop::new(tap),
            source,
            port: tap_port,
            running,
        })
    }

    fn create_scroll_event(&self, vertical: i32, horizontal: i32) -> PlatformResult<MacOSEvent> {
        let source = CGEventSource::new(CGEventSourceStateID::HIDSystemState)?;
        let event =
            CGEvent::new_scroll_event(source, ScrollEventUnit::PIXEL, 2, vertical, horizontal, 0)?;
        Ok(MacOSEvent::new(EventType::ScrollWheel, event))
    }
}

pub struct MacOSTap {
    tap: ManuallyDrop<CGEventTap<'static>>,
    source: CFRunLoopSource,
    port: TapPort,
    running: Arc<AtomicBool>,
}

/// # Safety
/// Starting and stopping only toggles the mach port through `CGEventTapEnable`, which is safe
/// from any thread. The run loop source is removed from the run loop that is current on drop,
/// so taps should be dropped on the event loop thread.
unsafe impl Send for MacOSTap {}
unsafe impl Sync for MacOSTap {}

impl EventTap for MacOSTap {
    fn start(&self) -> PlatformResult<()> {
        self.running.store(true, Ordering::SeqCst);
        self.port.set_enabled(true);
        if !self.port.is_enabled() {
            self.running.store(false, Ordering::SeqCst);
            return Err("Event tap could not be enabled, is accessibility access granted?".into());
        }
        Ok(())
    }

    fn stop(&self) -> PlatformResult<()> {
        self.running.store(false, Ordering::SeqCst);
        self.port.set_enabled(false);
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for MacOSTap {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.port.set_enabled(false);
        CFRunLoop::get_current().remove_source(&self.source, common_modes());
        unsafe { CFMachPortInvalidate(self.port.0) };

        // SAFETY: `tap` is never touched again after this point
        let tap = unsafe { ManuallyDrop::take(&mut self.tap) };
        if CALLBACK_DEPTH.with(Cell::get) > 0 {
            RELEASED_TAPS.with(|taps| taps.borrow_mut().push(tap));
        } else {
            drop(tap);
        }
    }
}
