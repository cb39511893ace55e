//! System clipboard access.
//!
//! Callers only ever care whether the write went through: a failure means
//! "show no confirmation", never "stop the app".

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
}

/// Anything that can take a string and put it on a clipboard.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The OS clipboard via `arboard`.
///
/// Opened lazily on first write.  The handle is kept alive afterwards because
/// on X11/Wayland the selection is lost when its owner goes away.  An open
/// failure is not cached, so the next click tries again.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            let cb = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            self.inner = Some(cb);
        }
        let Some(cb) = self.inner.as_mut() else {
            return Err(ClipboardError::Unavailable("not initialised".into()));
        };
        cb.set_text(text.to_owned())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}
