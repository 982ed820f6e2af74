//! Notifier adapters.

use crate::ports::outbound::Notifier;
use parking_lot::Mutex;
use shared_types::{Notification, NotificationLevel};
use tracing::{error, info, warn};

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => {
                info!(title = %notification.title, "{}", notification.text)
            }
            NotificationLevel::Warning => {
                warn!(title = %notification.title, "{}", notification.text)
            }
            NotificationLevel::Error => {
                error!(title = %notification.title, "{}", notification.text)
            }
        }
    }
}

/// Queues notifications until a front-end drains them.
#[derive(Debug, Default)]
pub struct QueueNotifier {
    queue: Mutex<Vec<Notification>>,
}

impl QueueNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued notification.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.queue.lock())
    }

    /// Copy of the queue without consuming it.
    pub fn peek(&self) -> Vec<Notification> {
        self.queue.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }
}

impl Notifier for QueueNotifier {
    fn notify(&self, notification: Notification) {
        self.queue.lock().push(notification);
    }
}
