//! Async runtime driving the event handler.
//!
//! [`App`] owns the state, the notification bus and tray, the remote API client
//! and the session store. [`App::dispatch`] runs an event through
//! [`handle_event`], executes the returned actions and feeds remote outcomes
//! back in until nothing is left to do, so the caller always observes a settled
//! state.

use crate::api::RemoteApi;
use crate::app::handler::{handle_event, Event};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::notify::{NotificationBus, NotificationTray};
use crate::storage::SessionStore;
use crate::ui::UIViewModel;
use std::collections::VecDeque;

/// The running client.
pub struct App {
    state: AppState,
    bus: NotificationBus,
    tray: NotificationTray,
    api: Box<dyn RemoteApi>,
    sessions: Box<dyn SessionStore>,
}

impl App {
    /// Builds the runtime and attaches a tray to `bus`.
    pub fn new(
        api: Box<dyn RemoteApi>,
        sessions: Box<dyn SessionStore>,
        bus: NotificationBus,
    ) -> Self {
        let tray = NotificationTray::attach(&bus);
        Self {
            state: AppState::new(),
            bus,
            tray,
            api,
            sessions,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn bus(&self) -> &NotificationBus {
        &self.bus
    }

    #[must_use]
    pub const fn tray(&self) -> &NotificationTray {
        &self.tray
    }

    /// View model of the current screen including visible toasts.
    #[must_use]
    pub fn viewmodel(&self) -> UIViewModel {
        self.state.compute_viewmodel(&self.tray.visible())
    }

    /// Restores a persisted session, if any, and loads its tasks.
    ///
    /// An unreadable session store is logged and treated as signed out.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`App::dispatch`].
    pub async fn start(&mut self) -> Result<bool> {
        match self.sessions.load_session() {
            Ok(Some(user)) => self.dispatch(Event::Restore(user)).await,
            Ok(None) => {
                tracing::debug!("no persisted session");
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not read persisted session");
                Ok(true)
            }
        }
    }

    /// Processes `event` and every event its actions produce.
    ///
    /// Returns whether anything changed that needs a redraw.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`handle_event`]; events queued behind it are
    /// dropped.
    pub async fn dispatch(&mut self, event: Event) -> Result<bool> {
        let mut queue = VecDeque::from([event]);
        let mut render = false;

        while let Some(event) = queue.pop_front() {
            let (needs_render, actions) = handle_event(&mut self.state, &self.bus, &event)?;
            render |= needs_render;

            for action in actions {
                if let Some(follow_up) = self.execute(action).await {
                    queue.push_back(follow_up);
                }
            }
        }

        Ok(render)
    }

    /// Runs one action. Remote calls yield the event carrying their outcome.
    async fn execute(&mut self, action: Action) -> Option<Event> {
        match action {
            Action::Call(request) => {
                let outcome = request.execute(self.api.as_ref()).await;
                Some(Event::ApiCompleted(outcome))
            }
            Action::PersistSession(user) => {
                if let Err(e) = self.sessions.save_session(&user) {
                    tracing::error!(error = %e, "failed to persist session");
                }
                None
            }
            Action::ClearSession => {
                if let Err(e) = self.sessions.clear_session() {
                    tracing::error!(error = %e, "failed to clear session");
                }
                None
            }
        }
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("state", &self.state)
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}
