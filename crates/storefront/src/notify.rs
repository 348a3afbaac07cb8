//! Transient user-facing notifications ("toasts").
//!
//! Every mutating store operation reports what happened through a
//! [`Notifier`]. Notifications are fire-and-forget: the store never reads
//! them back and cannot retract them.

use serde::Serialize;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    /// Something the user asked for happened.
    Success,
    /// Neutral information (removals, clears).
    Info,
    /// Something the user asked for did not happen.
    Error,
}

impl std::fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Info => write!(f, "info"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single message for the notification surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Sink for notifications.
pub trait Notifier {
    /// Deliver a notification. Must not block or fail.
    fn notify(&mut self, notification: Notification);
}

fn log(notification: &Notification) {
    match notification.level {
        NotificationLevel::Error => {
            tracing::warn!(level = %notification.level, "{}", notification.message);
        }
        NotificationLevel::Success | NotificationLevel::Info => {
            tracing::info!(level = %notification.level, "{}", notification.message);
        }
    }
}

/// Notifier that only logs. Used by the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notification: Notification) {
        log(&notification);
    }
}

/// Notifier that logs and buffers messages until drained.
///
/// The HTTP layer drains the queue after each request and returns the
/// messages with the response.
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    pending: Vec<Notification>,
}

impl NotificationQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every buffered notification, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    /// Buffered notifications, oldest first.
    #[must_use]
    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }
}

impl Notifier for NotificationQueue {
    fn notify(&mut self, notification: Notification) {
        log(&notification);
        self.pending.push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_drains_in_order() {
        let mut queue = NotificationQueue::new();
        queue.notify(Notification::success("first"));
        queue.notify(Notification::info("second"));

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].message, "first");
        assert_eq!(drained[1].level, NotificationLevel::Info);
        assert!(queue.pending().is_empty());
    }

    #[test]
    fn test_level_serializes_snake_case() {
        let json = serde_json::to_string(&Notification::error("nope")).unwrap_or_default();
        assert_eq!(json, r#"{"level":"error","message":"nope"}"#);
    }
}
