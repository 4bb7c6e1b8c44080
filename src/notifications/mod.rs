//! Transient user-facing messages with timed auto-dismissal.

pub mod center;
pub mod notification;
pub mod queue;

pub use center::{NotificationCenter, NotificationHandle};
pub use notification::{
    Notification, NotificationAction, NotificationId, NotificationPatch, NotificationSpec, Phase, Severity,
};
pub use queue::{NotificationQueue, Transition, CLOSE_DELAY, MAX_NOTIFICATIONS, REMOVE_DELAY};
