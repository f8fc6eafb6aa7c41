//! Notification sinks
//!
//! Fire-and-forget user feedback. The session never waits on a notifier and
//! never fails because of one.

use shared::Notification;
use std::sync::{Arc, Mutex};

/// Notification sink trait
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

/// Writes notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        if notification.is_destructive() {
            tracing::warn!(
                title = %notification.title,
                description = %notification.description,
                "Notification"
            );
        } else {
            tracing::info!(
                title = %notification.title,
                description = %notification.description,
                "Notification"
            );
        }
    }
}

/// Collects notifications in memory
///
/// Clones share the same buffer, so a clone handed to a session can be
/// inspected from outside.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    inner: Arc<Mutex<Vec<Notification>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far
    pub fn notifications(&self) -> Vec<Notification> {
        self.inner
            .lock()
            .map(|list| list.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn last(&self) -> Option<Notification> {
        self.notifications().pop()
    }

    /// Remove and return everything received so far
    pub fn drain(&self) -> Vec<Notification> {
        match self.inner.lock() {
            Ok(mut list) => std::mem::take(&mut *list),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        match self.inner.lock() {
            Ok(mut list) => list.push(notification),
            Err(poisoned) => poisoned.into_inner().push(notification),
        }
    }
}
