// Application state for HTTP handlers
use crate::application::dashboard_session::DashboardSession;
use crate::application::sample_source::SampleSource;
use crate::application::sample_store::{load_samples, AppliedLoad};
use crate::domain::hover::HoverState;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Shared by every handler. The session lock is only ever held for one
/// synchronous transition, never across an `.await`.
pub struct AppState {
    session: Mutex<DashboardSession>,
    source: Arc<dyn SampleSource>,
    hover_updates: watch::Receiver<HoverState>,
}

impl AppState {
    /// Wires a watch channel into the session's hover observers so streaming
    /// handlers can follow hover changes.
    pub fn new(mut session: DashboardSession, source: Arc<dyn SampleSource>) -> Self {
        let (tx, rx) = watch::channel(*session.hover_state());
        session.subscribe(move |state: &HoverState| {
            tx.send_replace(*state);
        });

        Self {
            session: Mutex::new(session),
            source,
            hover_updates: rx,
        }
    }

    pub fn session(&self) -> MutexGuard<'_, DashboardSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn hover_updates(&self) -> watch::Receiver<HoverState> {
        self.hover_updates.clone()
    }

    /// Fetches both series outside the lock, then applies them.
    pub async fn refresh(&self) -> AppliedLoad {
        let outcome = load_samples(self.source.as_ref()).await;
        self.session().apply_load(outcome)
    }
}
