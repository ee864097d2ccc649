use crate::platform::macos::event_source::release_deferred_taps;
use core_foundation::runloop::{
    kCFRunLoopCommonModes, kCFRunLoopDefaultMode, CFRunLoop, CFRunLoopMode,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

const SLICE: Duration = Duration::from_millis(100);

/// Mode every tap source is registered under, so taps keep firing during menu tracking
pub(crate) fn common_modes() -> CFRunLoopMode {
    unsafe { kCFRunLoopCommonModes }
}

/// Runs the current thread's run loop until `shutdown` is set. `tick` runs between slices.
pub fn run_event_loop<F>(shutdown: &AtomicBool, mut tick: F)
where
    F: FnMut(),
{
    let mode = unsafe { kCFRunLoopDefaultMode };
    while !shutdown.load(Ordering::SeqCst) {
        CFRunLoop::run_in_mode(mode, SLICE, false);
        release_deferred_taps();
        tick();
        release_deferred_taps();
    }
    release_deferred_taps();
}
