//! Transient notifications and the busy indicator.

use std::fmt;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
        }
    }
}

/// A message shown in the notification area
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
    shown_at: Instant,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.as_str(), self.message)
    }
}

/// Single-slot notification area; a new message replaces the current one and
/// every message disappears once its time to live has passed.
#[derive(Debug, Clone)]
pub struct Notifier {
    ttl: Duration,
    current: Option<Notification>,
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind) {
        self.show_at(message, kind, Instant::now());
    }

    pub fn show_at(&mut self, message: impl Into<String>, kind: NotificationKind, at: Instant) {
        self.current = Some(Notification {
            message: message.into(),
            kind,
            created_at: Utc::now(),
            shown_at: at,
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(message, NotificationKind::Success);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.show(message, NotificationKind::Warning);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(message, NotificationKind::Error);
    }

    /// The notification still visible right now
    pub fn visible(&self) -> Option<&Notification> {
        self.visible_at(Instant::now())
    }

    pub fn visible_at(&self, now: Instant) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|n| now.saturating_duration_since(n.shown_at) < self.ttl)
    }

    /// The last notification shown, whether or not it has expired
    pub fn last(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

/// Advisory busy overlay; nested calls keep it up until the outermost ends.
/// It never blocks new actions.
#[derive(Debug, Clone, Default)]
pub struct BusyIndicator {
    depth: u32,
}

impl BusyIndicator {
    pub fn begin(&mut self) {
        self.depth += 1;
    }

    pub fn end(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn is_visible(&self) -> bool {
        self.depth > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_expires_after_ttl() {
        let mut notifier = Notifier::new(Duration::from_secs(5));
        let start = Instant::now();
        notifier.show_at("Patient added", NotificationKind::Success, start);

        assert!(notifier.visible_at(start + Duration::from_secs(4)).is_some());
        assert!(notifier.visible_at(start + Duration::from_secs(5)).is_none());
        assert_eq!(notifier.last().map(|n| n.message.as_str()), Some("Patient added"));
    }

    #[test]
    fn test_new_notification_replaces_old() {
        let mut notifier = Notifier::new(Duration::from_secs(5));
        notifier.success("first");
        notifier.error("second");

        let shown = notifier.visible().unwrap();
        assert_eq!(shown.message, "second");
        assert_eq!(shown.kind, NotificationKind::Error);
        assert_eq!(shown.to_string(), "[error] second");
    }

    #[test]
    fn test_busy_indicator_nesting() {
        let mut busy = BusyIndicator::default();
        busy.begin();
        busy.begin();
        busy.end();
        assert!(busy.is_visible());
        busy.end();
        assert!(!busy.is_visible());
        busy.end();
        assert!(!busy.is_visible());
    }
}
