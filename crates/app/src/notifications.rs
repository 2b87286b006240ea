//! User-facing notifications
//!
//! Every outcome the user must acknowledge (failed login, failed fetch,
//! claim result) is pushed onto a queue. The front end shows the head of the
//! queue as a blocking message until it is dismissed.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sweeperkeeper_core::{AccountId, Error};
use tokio::sync::mpsc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A single blocking message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
    /// Underlying error text, for a "details" view or the log
    pub detail: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create a connected handle/queue pair
pub fn channel() -> (NotificationHandle, NotificationQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (NotificationHandle { tx }, NotificationQueue { rx })
}

/// Shared handle for raising notifications from any screen
#[derive(Clone)]
pub struct NotificationHandle {
    tx: mpsc::UnboundedSender<Notification>,
}

impl NotificationHandle {
    /// Server answered the login with `success: false`
    pub fn notify_login_rejected(&self) {
        self.send(
            NotificationLevel::Error,
            "Login Failed",
            "Invalid username or password",
            None,
        );
    }

    /// Login request itself failed
    pub fn notify_login_error(&self, err: &Error) {
        self.send(
            NotificationLevel::Error,
            "Error",
            "An error occurred while logging in",
            Some(err),
        );
    }

    /// A list fetch failed; `what` names the list ("accounts", "casinos")
    pub fn notify_fetch_failed(&self, what: &str, err: &Error) {
        self.send(
            NotificationLevel::Error,
            "Error",
            &format!("Failed to fetch {}", what),
            Some(err),
        );
    }

    pub fn notify_claim_succeeded(&self, account_id: &AccountId) {
        debug!("Claim confirmed for account {}", account_id);
        self.send(
            NotificationLevel::Success,
            "Success",
            "Coins claimed successfully",
            None,
        );
    }

    pub fn notify_claim_failed(&self, account_id: &AccountId, err: &Error) {
        debug!("Claim failed for account {}", account_id);
        self.send(NotificationLevel::Error, "Error", "Failed to claim coins", Some(err));
    }

    fn send(&self, level: NotificationLevel, title: &str, message: &str, err: Option<&Error>) {
        let notification = Notification {
            level,
            title: title.to_string(),
            message: message.to_string(),
            detail: err.map(|e| e.to_string()),
            created_at: Utc::now(),
        };

        debug!("Notification: {} - {}", notification.title, notification.message);

        if self.tx.send(notification).is_err() {
            warn!("Notification dropped, queue receiver is gone");
        }
    }
}

/// Receiving side, owned by the front end
pub struct NotificationQueue {
    rx: mpsc::UnboundedReceiver<Notification>,
}

impl NotificationQueue {
    /// Next pending notification without waiting
    pub fn try_next(&mut self) -> Option<Notification> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next notification
    pub async fn next(&mut self) -> Option<Notification> {
        self.rx.recv().await
    }

    /// Everything queued so far
    pub fn drain(&mut self) -> Vec<Notification> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}
