//! Display-side mirror of the notification bus.
//!
//! [`NotificationTray`] is the presentation collaborator: it subscribes to the bus
//! and keeps its own copies of the notifications currently on screen. The bus stays
//! the authority on what is live; the tray only follows its events.

use super::bus::{BusEvent, NotificationBus, Subscription};
use crate::domain::{Notification, NotificationId};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Subscriber holding display copies of live notifications in arrival order.
///
/// Unsubscribes from the bus when dropped.
#[derive(Debug)]
pub struct NotificationTray {
    items: Arc<Mutex<Vec<Notification>>>,
    bus: NotificationBus,
    subscription: Subscription,
}

impl NotificationTray {
    /// Subscribes a new, empty tray to `bus`.
    #[must_use]
    pub fn attach(bus: &NotificationBus) -> Self {
        let items: Arc<Mutex<Vec<Notification>>> = Arc::default();
        let sink = Arc::clone(&items);

        let subscription = bus.subscribe(move |event| {
            let mut items = lock(&sink);
            match event {
                BusEvent::Posted(notification) => items.push(notification.clone()),
                BusEvent::Removed(id) => items.retain(|n| n.id != *id),
                BusEvent::Cleared => items.clear(),
            }
        });

        Self {
            items,
            bus: bus.clone(),
            subscription,
        }
    }

    /// Copies of the notifications currently shown.
    #[must_use]
    pub fn visible(&self) -> Vec<Notification> {
        lock(&self.items).clone()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.items).is_empty()
    }

    /// Closes a notification: hides it at once, then asks the bus to drop it.
    pub fn dismiss(&self, id: NotificationId) {
        lock(&self.items).retain(|n| n.id != id);
        self.bus.remove(id);
    }

    /// Dismisses the notification at `index` in display order.
    ///
    /// Returns `false` when there is no notification at that position.
    pub fn dismiss_nth(&self, index: usize) -> bool {
        let Some(id) = lock(&self.items).get(index).map(|n| n.id) else {
            return false;
        };
        self.dismiss(id);
        true
    }

    /// Stops following the bus. The copies already held stay as they are.
    pub fn detach(&self) {
        self.subscription.unsubscribe();
    }
}

impl Drop for NotificationTray {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}

fn lock(items: &Mutex<Vec<Notification>>) -> MutexGuard<'_, Vec<Notification>> {
    items.lock().unwrap_or_else(PoisonError::into_inner)
}
