pub use event::*;
pub use event_source::*;
pub use notifier::*;
pub use run_loop::*;

mod event;
mod event_source;
mod ffi;
mod notifier;
mod run_loop;
