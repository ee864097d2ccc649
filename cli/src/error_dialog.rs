use mousebind_core::MousebindFatalError;
use native_dialog::{DialogBuilder, MessageLevel};

/// Show an error dialog for a fatal error
pub fn show_error(error: &MousebindFatalError) {
    let message = match error {
        MousebindFatalError::Error(msg) => msg.clone(),
        MousebindFatalError::PlatformError(e) => format!("{}", e),
    };

    let _ = DialogBuilder::message()
        .set_level(MessageLevel::Error)
        .set_title("Mousebind Error")
        .set_text(&message)
        .alert()
        .show();
}
