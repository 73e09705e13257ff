//! Transient user notifications.
//!
//! Every dispatch ends in exactly one [`Notice`]. Where it goes is up to
//! the [`Notifier`]: the log, a channel drained by a UI, or both.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Failure,
}

/// A short-lived, non-blocking message for the user.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// How long the notice should stay visible.
    pub timeout: Duration,
    pub issued_at: DateTime<Utc>,
}

impl Notice {
    pub fn success(message: impl Into<String>, timeout: Duration) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
            timeout,
            issued_at: Utc::now(),
        }
    }

    pub fn failure(message: impl Into<String>, timeout: Duration) -> Self {
        Self {
            level: NoticeLevel::Failure,
            message: message.into(),
            timeout,
            issued_at: Utc::now(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.level == NoticeLevel::Failure
    }
}

/// Sink for notices. Must never block the dispatch that produced them.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Writes notices to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => tracing::info!(message = %notice.message, "Notice"),
            NoticeLevel::Failure => tracing::warn!(message = %notice.message, "Notice"),
        }
    }
}

/// Forwards notices to an unbounded channel.
///
/// A dropped receiver is not an error: the notice is logged at debug
/// level and discarded.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notice>,
}

impl ChannelNotifier {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: Notice) {
        if let Err(e) = self.tx.send(notice) {
            tracing::debug!(message = %e.0.message, "Notice receiver gone; dropping notice");
        }
    }
}
