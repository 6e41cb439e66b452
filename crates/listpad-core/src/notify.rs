//! Transient, dismissible notifications (toasts).

use std::time::Duration;

use tokio::time::Instant;

/// How long a notification stays visible unless dismissed first.
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
}

impl Level {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub level: Level,
    pub message: String,
    raised_at: Instant,
}

impl Notification {
    /// Time left before this notification expires on its own.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        NOTIFICATION_TTL.saturating_sub(self.raised_at.elapsed())
    }
}

/// The notifications raised by one view.
#[derive(Debug, Default)]
pub struct Notifications {
    next_id: u64,
    items: Vec<Notification>,
}

impl Notifications {
    /// Raise an error notification and return its id.
    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.next_id = self.next_id.saturating_add(1);
        self.items.push(Notification {
            id: self.next_id,
            level: Level::Error,
            message: message.into(),
            raised_at: Instant::now(),
        });
        self.next_id
    }

    /// Dismiss one notification. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    /// Drop expired notifications and return the ones still showing.
    pub fn active(&mut self) -> &[Notification] {
        self.items.retain(|n| n.raised_at.elapsed() < NOTIFICATION_TTL);
        &self.items
    }
}
