//! Bounded most-recent-first notification queue.
//!
//! Each entry moves `Open` -> `Closing` -> removed. `Open` entries close on
//! their own after [`CLOSE_DELAY`]; a closing entry is removed
//! [`REMOVE_DELAY`] after it closed. The queue never reads a clock: every
//! time-dependent operation takes `now`.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::notification::{Notification, NotificationId, NotificationPatch, NotificationSpec, Phase};

/// Maximum number of entries held at once
pub const MAX_NOTIFICATIONS: usize = 5;

/// Time an entry stays open before closing by itself
pub const CLOSE_DELAY: Duration = Duration::from_millis(5000);

/// Time between closing and physical removal
pub const REMOVE_DELAY: Duration = Duration::from_millis(5000);

/// Ids wrap back to 1 past this bound
const ID_WRAP: u64 = (1 << 53) - 1;

/// A lifecycle step applied by [`NotificationQueue::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Closed(NotificationId),
    Removed(NotificationId),
}

#[derive(Debug, Default)]
pub struct NotificationQueue {
    entries: VecDeque<Notification>,
    last_id: u64,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> NotificationId {
        self.last_id = if self.last_id >= ID_WRAP { 1 } else { self.last_id + 1 };
        NotificationId(self.last_id)
    }

    /// Add an open entry at the front, dropping the oldest past the limit
    pub fn enqueue(&mut self, spec: NotificationSpec, now: Instant) -> NotificationId {
        let id = self.next_id();
        self.entries.push_front(Notification::new(id, spec, now + CLOSE_DELAY));
        while self.entries.len() > MAX_NOTIFICATIONS {
            if let Some(dropped) = self.entries.pop_back() {
                tracing::debug!(id = %dropped.id, "notification dropped over limit");
            }
        }
        id
    }

    /// Merge `patch` into the entry; returns false when the id is absent
    pub fn update(&mut self, id: NotificationId, patch: NotificationPatch) -> bool {
        match self.entries.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.apply(patch);
                true
            }
            None => false,
        }
    }

    /// Close one entry, or every entry for `None`. An entry that is already
    /// closing keeps its original removal time. Returns the ids closed.
    pub fn dismiss(&mut self, id: Option<NotificationId>, now: Instant) -> Vec<NotificationId> {
        let remove_at = now + REMOVE_DELAY;
        let mut closed = Vec::new();
        for notification in self.entries.iter_mut() {
            if id.map_or(false, |id| notification.id != id) {
                continue;
            }
            if notification.is_open() {
                notification.phase = Phase::Closing { remove_at };
                closed.push(notification.id);
            }
        }
        closed
    }

    /// Delete one entry immediately, or all entries for `None`
    pub fn remove_expired(&mut self, id: Option<NotificationId>) {
        match id {
            Some(id) => self.entries.retain(|n| n.id != id),
            None => self.entries.clear(),
        }
    }

    /// Apply every transition due at `now`
    pub fn advance(&mut self, now: Instant) -> Vec<Transition> {
        let mut transitions = Vec::new();

        for notification in self.entries.iter_mut() {
            if let Phase::Open { close_at } = notification.phase {
                if close_at <= now {
                    notification.phase = Phase::Closing {
                        remove_at: close_at + REMOVE_DELAY,
                    };
                    transitions.push(Transition::Closed(notification.id));
                }
            }
        }

        self.entries.retain(|notification| match notification.phase {
            Phase::Closing { remove_at } if remove_at <= now => {
                transitions.push(Transition::Removed(notification.id));
                false
            }
            _ => true,
        });

        transitions
    }

    /// Earliest pending deadline across all entries
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(Notification::deadline).min()
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.entries.iter().find(|n| n.id == id)
    }

    /// Entries, most recent first
    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn snapshot(&self) -> Vec<Notification> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::Severity;

    fn titled(title: &str) -> NotificationSpec {
        NotificationSpec::info(title)
    }

    fn titles(queue: &NotificationQueue) -> Vec<String> {
        queue
            .notifications()
            .map(|n| n.title.clone().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_newest_first_and_bounded() {
        let now = Instant::now();
        let mut queue = NotificationQueue::new();
        for i in 1..=6 {
            queue.enqueue(titled(&format!("n{}", i)), now);
        }

        assert_eq!(queue.len(), MAX_NOTIFICATIONS);
        assert_eq!(titles(&queue), vec!["n6", "n5", "n4", "n3", "n2"]);
    }

    #[test]
    fn test_ids_are_unique_and_wrap() {
        let now = Instant::now();
        let mut queue = NotificationQueue::new();
        let first = queue.enqueue(titled("a"), now);
        let second = queue.enqueue(titled("b"), now);
        assert_ne!(first, second);

        queue.last_id = ID_WRAP;
        assert_eq!(queue.enqueue(titled("c"), now).value(), 1);
    }

    #[test]
    fn test_auto_close_then_remove() {
        let start = Instant::now();
        let mut queue = NotificationQueue::new();
        let id = queue.enqueue(titled("saved"), start);

        assert!(queue.advance(start + Duration::from_millis(4999)).is_empty());
        assert_eq!(queue.next_deadline(), Some(start + CLOSE_DELAY));

        let fired = queue.advance(start + CLOSE_DELAY);
        assert_eq!(fired, vec![Transition::Closed(id)]);
        assert!(!queue.get(id).unwrap().is_open());

        assert!(queue.advance(start + Duration::from_millis(9999)).is_empty());
        let fired = queue.advance(start + CLOSE_DELAY + REMOVE_DELAY);
        assert_eq!(fired, vec![Transition::Removed(id)]);
        assert!(queue.is_empty());
        assert_eq!(queue.next_deadline(), None);
    }

    #[test]
    fn test_late_advance_fires_both_steps() {
        let start = Instant::now();
        let mut queue = NotificationQueue::new();
        let id = queue.enqueue(titled("late"), start);

        let fired = queue.advance(start + Duration::from_secs(60));
        assert_eq!(fired, vec![Transition::Closed(id), Transition::Removed(id)]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dismiss_twice_schedules_once() {
        let start = Instant::now();
        let mut queue = NotificationQueue::new();
        let id = queue.enqueue(titled("x"), start);

        assert_eq!(queue.dismiss(Some(id), start + Duration::from_millis(1000)), vec![id]);
        assert!(queue.dismiss(Some(id), start + Duration::from_millis(3000)).is_empty());
        assert_eq!(
            queue.get(id).unwrap().phase,
            Phase::Closing {
                remove_at: start + Duration::from_millis(6000)
            }
        );

        queue.advance(start + Duration::from_millis(6000));
        assert!(queue.get(id).is_none());
    }

    #[test]
    fn test_dismiss_all() {
        let now = Instant::now();
        let mut queue = NotificationQueue::new();
        queue.enqueue(titled("a"), now);
        queue.enqueue(titled("b"), now);

        assert_eq!(queue.dismiss(None, now).len(), 2);
        assert!(queue.notifications().all(|n| !n.is_open()));
        assert!(queue.dismiss(None, now).is_empty());
    }

    #[test]
    fn test_remove_expired() {
        let now = Instant::now();
        let mut queue = NotificationQueue::new();
        let a = queue.enqueue(titled("a"), now);
        queue.enqueue(titled("b"), now);

        queue.remove_expired(Some(a));
        assert_eq!(titles(&queue), vec!["b"]);

        queue.remove_expired(None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let now = Instant::now();
        let mut queue = NotificationQueue::new();
        let id = queue.enqueue(titled("a"), now);
        let before = queue.snapshot();

        let patch = NotificationPatch {
            severity: Some(Severity::Error),
            ..NotificationPatch::default()
        };
        assert!(!queue.update(NotificationId(id.value() + 100), patch.clone()));
        assert_eq!(queue.snapshot(), before);

        assert!(queue.update(id, patch));
        assert_eq!(queue.get(id).unwrap().severity, Severity::Error);
    }
}
