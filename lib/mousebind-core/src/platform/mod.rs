pub use common::*;
pub use notifier::*;
pub use traits::*;

mod common;
pub mod mock;
mod notifier;
mod traits;

use cfg_if::cfg_if;
use std::sync::Arc;

cfg_if! {
    if #[cfg(target_os = "macos")] {
        mod macos;
        pub use macos::{run_event_loop, MacOSEvent, MacOSEventSource, MacOSNotifier, MacOSTap};
        pub type PlatformEventSource = macos::MacOSEventSource;

        pub fn default_notifier() -> Arc<dyn Notifier> {
            Arc::new(MacOSNotifier)
        }
    } else {
        pub fn default_notifier() -> Arc<dyn Notifier> {
            Arc::new(LogNotifier)
        }
    }
}
