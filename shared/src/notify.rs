//! Toast notifications.

use std::{cell::RefCell, rc::Rc};

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Green toast.
    Success,
    /// Red toast.
    Error,
}

/// One auto-dismissing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Text shown to the user.
    pub message: String,
    /// How long the toast stays up.
    pub duration_ms: u32,
}

impl Notification {
    /// Success toast.
    pub fn success(message: impl Into<String>, duration_ms: u32) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            duration_ms,
        }
    }

    /// Error toast.
    pub fn error(message: impl Into<String>, duration_ms: u32) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            duration_ms,
        }
    }
}

/// Sink for toasts; the browser crate renders them, tests record them.
pub trait Notifier {
    /// Shows `notification`.
    fn notify(&self, notification: Notification);
}

impl<F> Notifier for F
where
    F: Fn(Notification),
{
    fn notify(&self, notification: Notification) {
        self(notification)
    }
}

/// Notifier that keeps every toast in memory.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    seen: Rc<RefCell<Vec<Notification>>>,
}

impl RecordingNotifier {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything shown so far.
    pub fn all(&self) -> Vec<Notification> {
        self.seen.borrow().clone()
    }

    /// Most recent toast.
    pub fn last(&self) -> Option<Notification> {
        self.seen.borrow().last().cloned()
    }

    /// Forgets recorded toasts.
    pub fn clear(&self) {
        self.seen.borrow_mut().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.borrow_mut().push(notification);
    }
}
