// src/notifications.rs
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient toast shown once on the next render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct Notifier {
    pending: Vec<Notification>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Error, message.into());
    }

    fn push(&mut self, kind: NotificationKind, message: String) {
        match kind {
            NotificationKind::Success => tracing::info!(%message, "notify"),
            NotificationKind::Error => tracing::warn!(%message, "notify"),
        }
        self.pending.push(Notification { kind, message, created_at: Utc::now() });
    }

    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }

    /// Takes every queued notification, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_in_order() {
        let mut notifier = Notifier::new();
        notifier.success("saved");
        notifier.error("boom");

        let drained = notifier.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].kind, NotificationKind::Success);
        assert_eq!(drained[1].message, "boom");
        assert!(notifier.pending().is_empty());
    }
}
