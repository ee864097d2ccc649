use crate::platform::Notifier;
use log::warn;
use std::process::{Command, Stdio};

/// Shows messages through Notification Center.
pub struct MacOSNotifier;

impl Notifier for MacOSNotifier {
    fn show(&self, message: &str) {
        let script = format!(
            "display notification \"{}\" with title \"Mousebind\"",
            escape(message)
        );
        // Not waited on, the tap callback must return quickly
        if let Err(e) = Command::new("osascript")
            .args(["-e", &script])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            warn!("Failed to show notification: {e}");
        }
    }
}

/// Backslashes go first so the later replacements are not escaped twice
fn escape(message: &str) -> String {
    message
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}
