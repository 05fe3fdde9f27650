use chrono::{DateTime, Utc};
use std::fmt;
use tokio::sync::broadcast;

/// User-visible outcome of a remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    FetchFailed,
    Created,
    CreateFailed,
    Updated,
    UpdateFailed,
    Deleted,
    DeleteFailed,
}

impl Notification {
    pub fn message(self) -> &'static str {
        match self {
            Notification::FetchFailed => "Failed to fetch users.",
            Notification::Created => "User added successfully!",
            Notification::CreateFailed => "Failed to add user.",
            Notification::Updated => "User updated successfully!",
            Notification::UpdateFailed => "Failed to update user.",
            Notification::Deleted => "User deleted successfully!",
            Notification::DeleteFailed => "Failed to delete user.",
        }
    }

    pub fn is_error(self) -> bool {
        matches!(
            self,
            Notification::FetchFailed
                | Notification::CreateFailed
                | Notification::UpdateFailed
                | Notification::DeleteFailed
        )
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone)]
pub struct NotificationEvent {
    pub notification: Notification,
    pub at: DateTime<Utc>,
}

/// Fan-out channel the UI layer subscribes to. Events sent while nobody is
/// listening are dropped.
#[derive(Debug, Clone)]
pub struct NotificationBus {
    sender: broadcast::Sender<NotificationEvent>,
}

impl NotificationBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, notification: Notification) {
        let event = NotificationEvent {
            notification,
            at: Utc::now(),
        };
        if self.sender.send(event).is_err() {
            log::debug!("no subscriber for notification: {}", notification);
        }
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new(64)
    }
}
