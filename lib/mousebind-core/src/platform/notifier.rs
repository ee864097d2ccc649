use crate::platform::Notifier;
use log::info;

/// Writes notifications to the log instead of the screen.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show(&self, message: &str) {
        info!("{message}");
    }
}

pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn show(&self, _message: &str) {}
}
