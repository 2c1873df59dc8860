//! JavaScript dialog capture.
//!
//! A reflected XSS payload typically announces itself with `alert()`. Every
//! page listens for `Page.javascriptDialogOpening`, records the dialog here
//! and dismisses it so the page never blocks. Tests then ask whether any
//! dialog opened after a given point.
//!
//! Messages live in an `Arc<Mutex<Vec<_>>>` rather than a channel: tests
//! query the same history several times, and ordering must be preserved.

use chromiumoxide::cdp::browser_protocol::page::{DialogType, EventJavascriptDialogOpening};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::SystemTime;

/// The kind of JavaScript dialog that was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DialogKind {
    /// `window.alert()`
    Alert,
    /// `window.confirm()`
    Confirm,
    /// `window.prompt()`
    Prompt,
    /// `beforeunload` confirmation
    BeforeUnload,
}

impl From<&DialogType> for DialogKind {
    fn from(kind: &DialogType) -> Self {
        match kind {
            DialogType::Alert => DialogKind::Alert,
            DialogType::Confirm => DialogKind::Confirm,
            DialogType::Prompt => DialogKind::Prompt,
            DialogType::Beforeunload => DialogKind::BeforeUnload,
        }
    }
}

/// A dialog observed on the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogMessage {
    /// Which dialog function was called.
    pub kind: DialogKind,

    /// The message passed to the dialog.
    pub message: String,

    /// URL of the frame that opened the dialog.
    pub url: String,

    /// When the dialog was observed (system time, not page time).
    pub timestamp: SystemTime,
}

impl DialogMessage {
    /// Creates a dialog record stamped with the current time.
    #[must_use]
    pub fn new(kind: DialogKind, message: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            url: url.into(),
            timestamp: SystemTime::now(),
        }
    }
}

impl From<&EventJavascriptDialogOpening> for DialogMessage {
    fn from(event: &EventJavascriptDialogOpening) -> Self {
        DialogMessage::new(
            DialogKind::from(&event.r#type),
            event.message.clone(),
            event.url.clone(),
        )
    }
}

/// Thread-safe, cheaply cloneable dialog history.
#[derive(Debug, Clone, Default)]
pub struct DialogCapture {
    messages: Arc<Mutex<Vec<DialogMessage>>>,
}

impl DialogCapture {
    /// Creates an empty capture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a dialog. A poisoned lock drops the record.
    pub(crate) fn push(&self, message: DialogMessage) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message);
        }
    }

    /// Returns a snapshot of every dialog seen so far.
    #[must_use]
    pub fn messages(&self) -> Vec<DialogMessage> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns only `alert()` dialogs.
    #[must_use]
    pub fn alerts(&self) -> Vec<DialogMessage> {
        self.messages()
            .into_iter()
            .filter(|m| m.kind == DialogKind::Alert)
            .collect()
    }

    /// Returns a position marker for use with [`DialogCapture::since`].
    #[must_use]
    pub fn mark(&self) -> usize {
        self.len()
    }

    /// Returns the dialogs recorded after `mark` was taken.
    #[must_use]
    pub fn since(&self, mark: usize) -> Vec<DialogMessage> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .skip(mark)
            .cloned()
            .collect()
    }

    /// Forgets all recorded dialogs.
    pub fn clear(&self) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.clear();
        }
    }

    /// Number of dialogs recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if no dialog has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialog_kind_from_cdp() {
        assert_eq!(DialogKind::from(&DialogType::Alert), DialogKind::Alert);
        assert_eq!(DialogKind::from(&DialogType::Prompt), DialogKind::Prompt);
        assert_eq!(
            DialogKind::from(&DialogType::Beforeunload),
            DialogKind::BeforeUnload
        );
    }

    #[test]
    fn capture_filters_alerts() {
        let capture = DialogCapture::new();
        capture.push(DialogMessage::new(DialogKind::Alert, "XSS", "https://idream.pl/"));
        capture.push(DialogMessage::new(DialogKind::Confirm, "leave?", "https://idream.pl/"));

        assert_eq!(capture.len(), 2);
        let alerts = capture.alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].message, "XSS");
    }

    #[test]
    fn since_returns_only_newer_dialogs() {
        let capture = DialogCapture::new();
        capture.push(DialogMessage::new(DialogKind::Alert, "old", "about:blank"));
        let mark = capture.mark();
        assert!(capture.since(mark).is_empty());

        capture.push(DialogMessage::new(DialogKind::Alert, "new", "about:blank"));
        let newer = capture.since(mark);
        assert_eq!(newer.len(), 1);
        assert_eq!(newer[0].message, "new");
    }

    #[test]
    fn clear_empties_capture() {
        let capture = DialogCapture::new();
        capture.push(DialogMessage::new(DialogKind::Alert, "1", "about:blank"));
        capture.clear();
        assert!(capture.is_empty());
    }
}
