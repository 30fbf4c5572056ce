//! Publish/subscribe registry for transient notifications.
//!
//! The bus owns the live set of notifications and the subscriber registry. Producers
//! (API outcomes, form validation) call [`NotificationBus::notify`] and friends;
//! display surfaces call [`NotificationBus::subscribe`] and mirror the events they
//! receive.
//!
//! # Delivery
//!
//! Events are queued under the state lock in the order operations are invoked and
//! drained by the first caller that finds no drain in progress. A handler that
//! publishes (for example by calling [`NotificationBus::remove`]) has its event
//! queued behind the one being delivered, so every subscriber sees events in
//! invocation order and never interleaved.
//!
//! # Expiry
//!
//! A notification with a non-zero TTL gets a tokio task that sleeps until the
//! deadline and then removes it. The task is bound to a [`CancellationToken`] that
//! [`NotificationBus::remove`] and [`NotificationBus::clear_all`] cancel. The task
//! only holds a weak reference to the bus, and a late firing for an id that is no
//! longer live publishes nothing.

use crate::domain::{Notification, NotificationId, NotificationKind};
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

/// Event delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    /// A new notification entered the live set.
    Posted(Notification),
    /// The notification with this id left the live set; drop the local copy.
    Removed(NotificationId),
    /// The live set was emptied; drop every local copy.
    Cleared,
}

/// Default time-to-live per notification kind.
///
/// Errors stay up longer than informational messages because they take longer to
/// read. A zero duration disables auto-expiry for that kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationDurations {
    pub success: Duration,
    pub error: Duration,
    pub warning: Duration,
    pub info: Duration,
    pub validation: Duration,
}

impl Default for NotificationDurations {
    fn default() -> Self {
        Self {
            success: Duration::from_millis(3000),
            error: Duration::from_millis(6000),
            warning: Duration::from_millis(5000),
            info: Duration::from_millis(3000),
            validation: Duration::from_millis(6000),
        }
    }
}

impl NotificationDurations {
    #[must_use]
    pub const fn for_kind(&self, kind: NotificationKind) -> Duration {
        match kind {
            NotificationKind::Success => self.success,
            NotificationKind::Error => self.error,
            NotificationKind::Warning => self.warning,
            NotificationKind::Info => self.info,
            NotificationKind::Validation => self.validation,
        }
    }
}

type Handler = Arc<dyn Fn(&BusEvent) + Send + Sync>;

struct LiveEntry {
    notification: Notification,
    expiry: Option<CancellationToken>,
}

#[derive(Default)]
struct BusState {
    live: Vec<LiveEntry>,
    subscribers: Vec<(u64, Handler)>,
    next_subscriber: u64,
    outbox: VecDeque<BusEvent>,
    draining: bool,
}

struct Inner {
    state: Mutex<BusState>,
    durations: NotificationDurations,
    runtime: Option<Handle>,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, BusState> {
        // Handlers run outside the lock, so a poisoned guard still holds consistent state.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Resets the drain flag if a handler panics mid-delivery.
struct DrainReset<'a>(&'a Inner);

impl Drop for DrainReset<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let mut state = self.0.lock();
            state.draining = false;
            state.outbox.clear();
        }
    }
}

/// Handle to the notification bus.
///
/// Constructed once at startup and cloned into every producer and consumer. Clones
/// share the same live set and subscriber registry.
///
/// # Example
///
/// ```
/// use taskdeck::notify::{BusEvent, NotificationBus, NotificationDurations};
/// use std::sync::{Arc, Mutex};
///
/// let bus = NotificationBus::new(NotificationDurations::default());
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// let subscription = bus.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
///
/// let id = bus.success("Saved");
/// bus.remove(id);
/// subscription.unsubscribe();
///
/// assert_eq!(seen.lock().unwrap().len(), 2);
/// ```
#[derive(Clone)]
pub struct NotificationBus {
    inner: Arc<Inner>,
}

impl NotificationBus {
    /// Creates a bus that schedules expiry on the current tokio runtime.
    ///
    /// Outside a runtime the bus still works, but notifications never auto-expire.
    #[must_use]
    pub fn new(durations: NotificationDurations) -> Self {
        let runtime = Handle::try_current().ok();
        if runtime.is_none() {
            tracing::warn!("notification bus created outside a tokio runtime, auto-expiry disabled");
        }
        Self::build(durations, runtime)
    }

    /// Creates a bus that schedules expiry on the given runtime.
    #[must_use]
    pub fn with_runtime(durations: NotificationDurations, runtime: Handle) -> Self {
        Self::build(durations, Some(runtime))
    }

    fn build(durations: NotificationDurations, runtime: Option<Handle>) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(BusState::default()),
                durations,
                runtime,
            }),
        }
    }

    #[must_use]
    pub fn durations(&self) -> NotificationDurations {
        self.inner.durations
    }

    /// Registers `handler` for every event published from now on.
    ///
    /// Past events are not replayed.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&BusEvent) + Send + Sync + 'static,
    {
        let mut state = self.inner.lock();
        let id = state.next_subscriber;
        state.next_subscriber += 1;
        state.subscribers.push((id, Arc::new(handler)));
        tracing::debug!(subscriber_id = id, total = state.subscribers.len(), "subscriber registered");

        Subscription {
            bus: Arc::downgrade(&self.inner),
            id,
            active: AtomicBool::new(true),
        }
    }

    /// Publishes a notification with the kind's default TTL.
    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) -> NotificationId {
        self.notify_for(kind, message, self.inner.durations.for_kind(kind))
    }

    /// Publishes a notification that expires after `ttl`, or never if `ttl` is zero.
    ///
    /// Subscribers receive [`BusEvent::Posted`] before this returns. Expiry runs in
    /// the background and is never awaited here.
    pub fn notify_for(
        &self,
        kind: NotificationKind,
        message: impl Into<String>,
        ttl: Duration,
    ) -> NotificationId {
        let notification = Notification::new(kind, message, ttl);
        let id = notification.id;

        let mut state = self.inner.lock();
        let expiry = if notification.expires() {
            self.schedule_expiry(id, ttl)
        } else {
            None
        };
        state.live.push(LiveEntry {
            notification: notification.clone(),
            expiry,
        });

        tracing::debug!(
            notification_id = %id,
            kind = %kind,
            ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX),
            live = state.live.len(),
            "notification posted"
        );

        self.publish(state, BusEvent::Posted(notification));
        id
    }

    pub fn success(&self, message: impl Into<String>) -> NotificationId {
        self.notify(NotificationKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> NotificationId {
        self.notify(NotificationKind::Error, message)
    }

    pub fn warning(&self, message: impl Into<String>) -> NotificationId {
        self.notify(NotificationKind::Warning, message)
    }

    pub fn info(&self, message: impl Into<String>) -> NotificationId {
        self.notify(NotificationKind::Info, message)
    }

    /// Publishes a validation message formatted as `"<field>: <message>"`.
    pub fn validation(&self, field: &str, message: &str) -> NotificationId {
        self.notify(NotificationKind::Validation, format!("{field}: {message}"))
    }

    /// Removes a live notification and tells subscribers to drop it.
    ///
    /// Returns `false` without publishing anything when `id` is not live.
    pub fn remove(&self, id: NotificationId) -> bool {
        self.remove_entry(id, "removed")
    }

    /// Empties the live set, cancels pending expiry and publishes one [`BusEvent::Cleared`].
    pub fn clear_all(&self) {
        let mut state = self.inner.lock();
        let cleared = state.live.len();
        for entry in state.live.drain(..) {
            if let Some(token) = entry.expiry {
                token.cancel();
            }
        }
        tracing::debug!(cleared, "notifications cleared");
        self.publish(state, BusEvent::Cleared);
    }

    /// Drops all live notifications and subscribers without publishing anything.
    ///
    /// Intended for isolating tests that share one bus.
    pub fn reset(&self) {
        let mut state = self.inner.lock();
        for entry in state.live.drain(..) {
            if let Some(token) = entry.expiry {
                token.cancel();
            }
        }
        state.subscribers.clear();
        state.outbox.clear();
        tracing::debug!("notification bus reset");
    }

    /// Snapshot of the live set in posting order.
    #[must_use]
    pub fn live(&self) -> Vec<Notification> {
        self.inner
            .lock()
            .live
            .iter()
            .map(|entry| entry.notification.clone())
            .collect()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }

    fn remove_entry(&self, id: NotificationId, reason: &'static str) -> bool {
        let mut state = self.inner.lock();
        let Some(pos) = state.live.iter().position(|entry| entry.notification.id == id) else {
            tracing::trace!(notification_id = %id, reason, "notification not live, nothing to remove");
            return false;
        };

        let entry = state.live.remove(pos);
        if let Some(token) = entry.expiry {
            token.cancel();
        }
        tracing::debug!(notification_id = %id, reason, live = state.live.len(), "notification removed");

        self.publish(state, BusEvent::Removed(id));
        true
    }

    fn schedule_expiry(&self, id: NotificationId, ttl: Duration) -> Option<CancellationToken> {
        let runtime = self.inner.runtime.as_ref()?;

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let bus = Arc::downgrade(&self.inner);
        let deadline = tokio::time::Instant::now() + ttl;

        runtime.spawn(async move {
            tokio::select! {
                () = cancelled.cancelled() => {}
                () = tokio::time::sleep_until(deadline) => {
                    if let Some(inner) = bus.upgrade() {
                        Self { inner }.remove_entry(id, "expired");
                    }
                }
            }
        });

        Some(token)
    }

    fn publish<'a>(&'a self, mut state: MutexGuard<'a, BusState>, event: BusEvent) {
        state.outbox.push_back(event);
        if state.draining {
            return;
        }
        state.draining = true;

        let _reset = DrainReset(&self.inner);
        loop {
            let Some(event) = state.outbox.pop_front() else {
                state.draining = false;
                return;
            };
            let handlers: Vec<Handler> = state
                .subscribers
                .iter()
                .map(|(_, handler)| Arc::clone(handler))
                .collect();
            drop(state);

            for handler in &handlers {
                handler(&event);
            }

            state = self.inner.lock();
        }
    }
}

impl fmt::Debug for NotificationBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("NotificationBus")
            .field("live", &state.live.len())
            .field("subscribers", &state.subscribers.len())
            .field("durations", &self.inner.durations)
            .finish_non_exhaustive()
    }
}

/// Capability returned by [`NotificationBus::subscribe`].
///
/// Dropping it does not unsubscribe; call [`Subscription::unsubscribe`].
#[must_use = "keep the subscription to be able to unsubscribe"]
pub struct Subscription {
    bus: Weak<Inner>,
    id: u64,
    active: AtomicBool,
}

impl Subscription {
    /// Removes the handler from the registry. Calling it again is a no-op.
    pub fn unsubscribe(&self) {
        if !self.active.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Some(inner) = self.bus.upgrade() {
            let mut state = inner.lock();
            state.subscribers.retain(|(id, _)| *id != self.id);
            tracing::debug!(subscriber_id = self.id, total = state.subscribers.len(), "subscriber removed");
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    type Log = Arc<Mutex<Vec<BusEvent>>>;

    fn record(bus: &NotificationBus) -> (Log, Subscription) {
        let log: Log = Arc::default();
        let sink = Arc::clone(&log);
        let subscription = bus.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
        (log, subscription)
    }

    fn removals(log: &Log) -> Vec<NotificationId> {
        log.lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                BusEvent::Removed(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    fn posted_messages(log: &Log) -> Vec<String> {
        log.lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                BusEvent::Posted(n) => Some(n.message.clone()),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn subscribers_see_events_in_publish_order() {
        let bus = NotificationBus::new(NotificationDurations::default());
        let (first, _a) = record(&bus);
        let (second, _b) = record(&bus);

        bus.info("one");
        bus.error("two");
        bus.success("three");

        let expected = vec!["one".to_string(), "two".to_string(), "three".to_string()];
        assert_eq!(posted_messages(&first), expected);
        assert_eq!(posted_messages(&second), expected);
    }

    #[tokio::test]
    async fn late_subscribers_do_not_get_history() {
        let bus = NotificationBus::new(NotificationDurations::default());
        bus.info("before");
        let (log, _sub) = record(&bus);
        bus.info("after");

        assert_eq!(posted_messages(&log), vec!["after".to_string()]);
    }

    #[tokio::test]
    async fn unsubscribe_is_idempotent() {
        let bus = NotificationBus::new(NotificationDurations::default());
        let (log, subscription) = record(&bus);
        let (_other, _keep) = record(&bus);

        subscription.unsubscribe();
        subscription.unsubscribe();

        assert!(!subscription.is_active());
        assert_eq!(bus.subscriber_count(), 1);
        bus.info("ignored");
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn notification_expires_once_after_ttl() {
        let bus = NotificationBus::new(NotificationDurations::default());
        let (log, _sub) = record(&bus);

        let id = bus.notify_for(NotificationKind::Info, "short", Duration::from_millis(3000));

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert_eq!(bus.live().len(), 1);
        assert!(removals(&log).is_empty());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(bus.live().is_empty());
        assert_eq!(removals(&log), vec![id]);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(removals(&log), vec![id]);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_ttl_never_expires() {
        let bus = NotificationBus::new(NotificationDurations::default());
        let (log, _sub) = record(&bus);

        bus.notify_for(NotificationKind::Warning, "sticky", Duration::ZERO);
        tokio::time::sleep(Duration::from_secs(3600)).await;

        assert_eq!(bus.live().len(), 1);
        assert!(removals(&log).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn removal_before_expiry_publishes_once() {
        let bus = NotificationBus::new(NotificationDurations::default());
        let (log, _sub) = record(&bus);

        let id = bus.notify_for(NotificationKind::Success, "done", Duration::from_millis(500));
        assert!(bus.remove(id));

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(removals(&log), vec![id]);
        assert!(!bus.remove(id));
        assert_eq!(removals(&log), vec![id]);
    }

    #[tokio::test(start_paused = true)]
    async fn clear_all_cancels_pending_expiry() {
        let bus = NotificationBus::new(NotificationDurations::default());
        let (log, _sub) = record(&bus);

        bus.info("a");
        bus.error("b");
        bus.clear_all();
        tokio::time::sleep(Duration::from_secs(30)).await;

        let events = log.lock().unwrap().clone();
        assert_eq!(events.len(), 3);
        assert_eq!(events[2], BusEvent::Cleared);
        assert!(bus.live().is_empty());
    }

    #[tokio::test]
    async fn removing_unknown_id_is_silent() {
        let bus = NotificationBus::new(NotificationDurations::default());
        let (log, _sub) = record(&bus);

        assert!(!bus.remove(NotificationId::new()));
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn validation_prefixes_field_name() {
        let bus = NotificationBus::new(NotificationDurations::default());
        bus.validation("password", "Passwords do not match.");

        let live = bus.live();
        assert_eq!(live[0].kind, NotificationKind::Validation);
        assert_eq!(live[0].message, "password: Passwords do not match.");
    }

    #[test]
    fn errors_outlast_informational_messages() {
        let durations = NotificationDurations::default();
        assert!(durations.for_kind(NotificationKind::Error) > durations.for_kind(NotificationKind::Info));
        assert!(durations.for_kind(NotificationKind::Error) > durations.for_kind(NotificationKind::Success));
    }

    #[tokio::test]
    async fn reentrant_publish_is_queued_behind_current_event() {
        let bus = NotificationBus::new(NotificationDurations::default());
        let (log, _first) = record(&bus);

        let inner_bus = bus.clone();
        let _dismisser = bus.subscribe(move |event| {
            if let BusEvent::Posted(notification) = event {
                inner_bus.remove(notification.id);
            }
        });
        let (late, _last) = record(&bus);

        let id = bus.info("flash");

        let expected = vec![BusEvent::Posted(bus_posted(&log)), BusEvent::Removed(id)];
        assert_eq!(*log.lock().unwrap(), expected);
        assert_eq!(*late.lock().unwrap(), expected);
        assert!(bus.live().is_empty());
    }

    fn bus_posted(log: &Log) -> Notification {
        match &log.lock().unwrap()[0] {
            BusEvent::Posted(n) => n.clone(),
            other => panic!("expected posted event, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn reset_drops_subscribers_and_live_set_silently() {
        let bus = NotificationBus::new(NotificationDurations::default());
        let (log, _sub) = record(&bus);
        bus.info("x");

        bus.reset();

        assert_eq!(bus.subscriber_count(), 0);
        assert!(bus.live().is_empty());
        assert_eq!(log.lock().unwrap().len(), 1);
    }
}
