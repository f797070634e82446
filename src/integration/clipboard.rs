//! Clipboard output backed by the `arboard` crate.
//!
//! A short-lived [`arboard::Clipboard`] handle is opened per call, because
//! `arboard::Clipboard` is not `Send` on all platforms.

use arboard::Clipboard;

use super::ClipboardError;

/// Replace the system clipboard content with `text`.
///
/// Empty text is ignored rather than clearing the clipboard.
///
/// # Errors
///
/// [`ClipboardError::Access`] if the clipboard cannot be opened,
/// [`ClipboardError::Set`] if writing fails.
pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    if text.is_empty() {
        return Ok(());
    }
    let mut clipboard = open_clipboard()?;
    clipboard
        .set_text(text)
        .map_err(|e| ClipboardError::Set(e.to_string()))
}

/// Current plain-text clipboard content; `None` when empty or non-text.
pub fn read_clipboard() -> Result<Option<String>, ClipboardError> {
    let mut clipboard = open_clipboard()?;
    Ok(clipboard.get_text().ok())
}

fn open_clipboard() -> Result<Clipboard, ClipboardError> {
    Clipboard::new().map_err(|e| ClipboardError::Access(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_never_touches_clipboard() {
        // Succeeds even on headless machines with no clipboard.
        assert!(copy_to_clipboard("").is_ok());
    }
}
