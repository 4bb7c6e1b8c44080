use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Notify, RwLock};
use tokio::task::JoinHandle;

use super::notification::{Notification, NotificationId, NotificationPatch, NotificationSpec};
use super::queue::{NotificationQueue, Transition};

/// Clock reading that follows tokio's (possibly paused) time
fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

struct Shared {
    queue: RwLock<NotificationQueue>,
    wake: Notify,
}

/// Owns the notification queue and the task that applies its timed
/// transitions. Create one per application and pass it by reference.
pub struct NotificationCenter {
    shared: Arc<Shared>,
    driver: JoinHandle<()>,
}

/// Returned by [`NotificationCenter::enqueue`]
#[derive(Clone)]
pub struct NotificationHandle {
    pub id: NotificationId,
    shared: Arc<Shared>,
}

impl NotificationHandle {
    /// Close this notification; its removal follows after the usual delay
    pub async fn dismiss(&self) {
        dismiss(&self.shared, Some(self.id)).await;
    }
}

async fn dismiss(shared: &Shared, id: Option<NotificationId>) {
    let closed = shared.queue.write().await.dismiss(id, now());
    if !closed.is_empty() {
        tracing::debug!(count = closed.len(), "notifications dismissed");
        shared.wake.notify_one();
    }
}

impl NotificationCenter {
    /// Start the center. Must be called inside a tokio runtime.
    pub fn new() -> Self {
        let shared = Arc::new(Shared {
            queue: RwLock::new(NotificationQueue::new()),
            wake: Notify::new(),
        });
        let driver = tokio::spawn(drive(Arc::clone(&shared)));
        Self { shared, driver }
    }

    pub async fn enqueue(&self, spec: NotificationSpec) -> NotificationHandle {
        let severity = spec.severity;
        let id = self.shared.queue.write().await.enqueue(spec, now());
        tracing::debug!(%id, %severity, "notification enqueued");
        self.shared.wake.notify_one();

        NotificationHandle {
            id,
            shared: Arc::clone(&self.shared),
        }
    }

    /// Merge `patch` into a notification; absent ids are ignored
    pub async fn update(&self, patch: NotificationPatch, id: NotificationId) {
        if !self.shared.queue.write().await.update(id, patch) {
            tracing::debug!(%id, "update for unknown notification ignored");
        }
    }

    /// Close one notification, or all of them for `None`
    pub async fn dismiss(&self, id: Option<NotificationId>) {
        dismiss(&self.shared, id).await;
    }

    /// Remove one notification now, or all of them for `None`
    pub async fn remove_expired(&self, id: Option<NotificationId>) {
        self.shared.queue.write().await.remove_expired(id);
        self.shared.wake.notify_one();
    }

    /// Current entries, most recent first
    pub async fn snapshot(&self) -> Vec<Notification> {
        self.shared.queue.read().await.snapshot()
    }

    pub async fn len(&self) -> usize {
        self.shared.queue.read().await.len()
    }

    /// Stop the driver task; entries stay readable but no longer expire
    pub fn shutdown(&self) {
        self.driver.abort();
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for NotificationCenter {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

/// Sleep until the next deadline or a state change, then fire what is due
async fn drive(shared: Arc<Shared>) {
    loop {
        let deadline = shared.queue.read().await.next_deadline();

        match deadline {
            Some(deadline) => {
                tokio::select! {
                    _ = tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)) => {
                        let fired = shared.queue.write().await.advance(now());
                        for transition in fired {
                            match transition {
                                Transition::Closed(id) => tracing::debug!(%id, "notification closed"),
                                Transition::Removed(id) => tracing::debug!(%id, "notification removed"),
                            }
                        }
                    }
                    _ = shared.wake.notified() => {}
                }
            }
            None => shared.wake.notified().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::{Severity, MAX_NOTIFICATIONS};
    use std::time::Duration;

    async fn sleep_ms(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_close_and_removal() {
        let center = NotificationCenter::new();
        let handle = center.enqueue(NotificationSpec::success("Inquiry Sent!")).await;

        sleep_ms(4990).await;
        assert!(center.snapshot().await[0].is_open());

        sleep_ms(20).await;
        let entries = center.snapshot().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, handle.id);
        assert!(!entries[0].is_open());

        sleep_ms(4980).await;
        assert_eq!(center.len().await, 1);

        sleep_ms(20).await;
        assert_eq!(center.len().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_dismiss_then_removal() {
        let center = NotificationCenter::new();
        let handle = center.enqueue(NotificationSpec::info("Saved")).await;

        sleep_ms(1000).await;
        handle.dismiss().await;
        assert!(!center.snapshot().await[0].is_open());

        sleep_ms(2000).await;
        handle.dismiss().await;

        // removal stays at 1000 + 5000
        sleep_ms(2990).await;
        assert_eq!(center.len().await, 1);
        sleep_ms(20).await;
        assert_eq!(center.len().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bounded_and_update() {
        let center = NotificationCenter::new();
        let mut handles = Vec::new();
        for i in 0..6 {
            handles.push(center.enqueue(NotificationSpec::info(format!("n{}", i))).await);
        }

        let entries = center.snapshot().await;
        assert_eq!(entries.len(), MAX_NOTIFICATIONS);
        assert!(entries.iter().all(|n| n.id != handles[0].id));

        let patch = NotificationPatch {
            severity: Some(Severity::Warning),
            ..NotificationPatch::default()
        };
        center.update(patch.clone(), handles[0].id).await;
        center.update(patch, handles[5].id).await;
        let entries = center.snapshot().await;
        assert_eq!(entries[0].severity, Severity::Warning);
        assert_eq!(entries[1].severity, Severity::Info);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_all_and_clear() {
        let center = NotificationCenter::new();
        center.enqueue(NotificationSpec::info("a")).await;
        center.enqueue(NotificationSpec::info("b")).await;

        center.dismiss(None).await;
        assert!(center.snapshot().await.iter().all(|n| !n.is_open()));

        center.remove_expired(None).await;
        assert_eq!(center.len().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_expiry() {
        let center = NotificationCenter::new();
        center.enqueue(NotificationSpec::info("kept")).await;
        center.shutdown();

        sleep_ms(20_000).await;
        assert_eq!(center.len().await, 1);
    }
}
