use core_foundation::mach_port::CFMachPortRef;

#[link(name = "CoreGraphics", kind = "framework")]
extern "C" {
    pub fn CGEventTapEnable(tap: CFMachPortRef, enable: bool);
    pub fn CGEventTapIsEnabled(tap: CFMachPortRef) -> bool;
}

#[link(name = "CoreFoundation", kind = "framework")]
extern "C" {
    pub fn CFMachPortInvalidate(port: CFMachPortRef);
}

/// A mach port reference that can be handed to the tap callback.
///
/// # Safety
/// `CGEventTapEnable` may be called from any thread. The port is kept alive by the owning tap.
#[derive(Clone, Copy)]
pub struct TapPort(pub CFMachPortRef);

unsafe impl Send for TapPort {}
unsafe impl Sync for TapPort {}

impl TapPort {
    pub fn set_enabled(&self, enabled: bool) {
        unsafe { CGEventTapEnable(self.0, enabled) }
    }

    pub fn is_enabled(&self) -> bool {
        unsafe { CGEventTapIsEnabled(self.0) }
    }
}
