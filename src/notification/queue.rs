use crate::config::NotificationConfig;
use crate::notification::{Notification, NotificationId, NotificationSink, Severity};
use chrono::Utc;
use parking_lot::Mutex;
use std::{sync::Arc, time::Duration};
use tokio::{sync::Notify, task::JoinHandle, time::Instant};

/// Ordered set of active notifications, each with its own expiry deadline
///
/// Clones share the same queue. Expired entries are hidden from [`active`]
/// as soon as their deadline passes; [`purge_expired`] or the task started by
/// [`spawn_expiry`] removes them for good.
///
/// [`active`]: NotificationQueue::active
/// [`purge_expired`]: NotificationQueue::purge_expired
/// [`spawn_expiry`]: NotificationQueue::spawn_expiry
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    entries: Arc<Mutex<Vec<Entry>>>,
    wake: Arc<Notify>,
    default_duration: Duration,
    closing_delay: Duration,
}

#[derive(Debug)]
struct Entry {
    notification: Notification,
    deadline: Instant,
}

impl NotificationQueue {
    pub fn new(config: &NotificationConfig) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            wake: Arc::new(Notify::new()),
            default_duration: config.default_duration(),
            closing_delay: config.closing_delay(),
        }
    }

    /// Adds a notification shown for the default duration
    pub fn enqueue(&self, message: impl Into<String>, severity: Severity) -> NotificationId {
        self.enqueue_for(message, severity, self.default_duration)
    }

    /// Adds a notification shown for `duration`
    pub fn enqueue_for(
        &self,
        message: impl Into<String>,
        severity: Severity,
        duration: Duration,
    ) -> NotificationId {
        let notification = Notification {
            id: NotificationId::generate(),
            message: message.into(),
            severity,
            duration,
            created_at: Utc::now(),
            closing: false,
        };
        let id = notification.id;

        tracing::debug!(notification_id = %id, %severity, "notification enqueued");
        self.entries.lock().push(Entry {
            notification,
            deadline: Instant::now() + duration,
        });
        self.wake.notify_one();
        id
    }

    /// Removes a notification immediately. Returns `false` if it was not queued.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|entry| entry.notification.id != id);
        before != entries.len()
    }

    /// User-initiated close: the notification is removed after the closing
    /// delay, or at its own deadline if that comes first.
    pub fn close(&self, id: NotificationId) -> bool {
        let mut entries = self.entries.lock();
        let Some(entry) = entries
            .iter_mut()
            .find(|entry| entry.notification.id == id && !entry.notification.closing)
        else {
            return false;
        };

        entry.notification.closing = true;
        entry.deadline = entry.deadline.min(Instant::now() + self.closing_delay);
        drop(entries);

        self.wake.notify_one();
        true
    }

    /// Snapshot of live notifications in insertion order
    pub fn active(&self) -> Vec<Notification> {
        let now = Instant::now();
        self.entries
            .lock()
            .iter()
            .filter(|entry| entry.deadline > now)
            .map(|entry| entry.notification.clone())
            .collect()
    }

    /// Number of live notifications
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .iter()
            .filter(|entry| entry.deadline > now)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every notification whose deadline has passed
    pub fn purge_expired(&self) -> Vec<NotificationId> {
        let now = Instant::now();
        let mut expired = Vec::new();
        self.entries.lock().retain(|entry| {
            let live = entry.deadline > now;
            if !live {
                expired.push(entry.notification.id);
            }
            live
        });

        if !expired.is_empty() {
            tracing::debug!(count = expired.len(), "notifications expired");
        }
        expired
    }

    /// Earliest pending deadline, `None` when the queue is empty
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.lock().iter().map(|entry| entry.deadline).min()
    }

    /// Spawns a task that removes notifications as their deadlines pass.
    ///
    /// The task runs until aborted through the returned handle.
    pub fn spawn_expiry(&self) -> JoinHandle<()> {
        let queue = self.clone();
        tokio::spawn(async move { queue.run_expiry().await })
    }

    async fn run_expiry(&self) {
        loop {
            self.purge_expired();
            match self.next_deadline() {
                Some(deadline) => {
                    tokio::select! {
                        _ = tokio::time::sleep_until(deadline) => {}
                        _ = self.wake.notified() => {}
                    }
                }
                None => self.wake.notified().await,
            }
        }
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(&NotificationConfig::default())
    }
}

impl NotificationSink for NotificationQueue {
    fn notify(&self, message: String, severity: Severity) {
        self.enqueue(message, severity);
    }
}
