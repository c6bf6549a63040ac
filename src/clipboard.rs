//! System clipboard access with a timed auto-clear.

use std::thread;
use std::time::Duration;

use crate::errors::{Result, SecurePassError};

/// Default delay before a copied credential is wiped from the clipboard.
pub const DEFAULT_CLEAR_DELAY: Duration = Duration::from_secs(30);

/// Copy `text` to the clipboard and clear it again after `delay`.
///
/// The clear runs on a detached background thread, so this returns as
/// soon as the copy succeeds.  A later copy does not cancel an earlier
/// timer.
pub fn copy_with_auto_clear(text: &str, delay: Duration) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| SecurePassError::Clipboard(format!("clipboard unavailable: {e}")))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| SecurePassError::Clipboard(format!("failed to copy to clipboard: {e}")))?;

    thread::spawn(move || {
        thread::sleep(delay);
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(String::new())) {
            Ok(()) => tracing::debug!("clipboard cleared"),
            Err(e) => tracing::warn!(error = %e, "failed to clear clipboard"),
        }
    });

    Ok(())
}
