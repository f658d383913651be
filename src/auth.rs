//! Session state bridged into the reactive world.
//!
//! The service from [`crate::session`] owns the persisted state and the
//! change channel; this module mirrors it into a signal and hands both out
//! through context. The router checks authentication through the derived
//! signal, so it stays decoupled from how sessions are stored.

use std::sync::Arc;

use leptos::prelude::*;

use crate::session::{Session, SessionService, Subscription};
use crate::web::{WebSessionStorage, on_storage_event};

pub type WebSessionService = SessionService<WebSessionStorage>;

/// Shared through context by [`provide_session`].
///
/// The signal is a read-only mirror of the service's cache; all mutation
/// goes through the service so every change reaches the one channel.
#[derive(Clone)]
pub struct SessionContext {
    service: Arc<WebSessionService>,
    session: ReadSignal<Session>,
    _mirror: Arc<Subscription>,
}

impl SessionContext {
    /// Reactive session snapshot, for views that render from it.
    pub fn session(&self) -> ReadSignal<Session> {
        self.session
    }

    /// Authentication signal injected into the router.
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.get().is_authenticated())
    }

    /// Credential as persisted right now. Read at action time, not
    /// reactively; a request should carry whatever the session holds when
    /// the user acts.
    pub fn token(&self) -> Option<String> {
        self.service.current().token
    }

    pub fn sign_in(&self, token: &str, display_name: &str) {
        self.service.sign_in(token, display_name);
    }

    pub fn sign_out(&self) {
        self.service.sign_out();
    }
}

/// Builds the session service, wires the cross-tab listener and provides
/// the context. Call once from `App`, before the router mounts, so the
/// initial route resolves against a restored session.
pub fn provide_session() -> SessionContext {
    let service = Arc::new(SessionService::new(WebSessionStorage));

    let (session, set_session) = signal(service.current());
    let mirror = service.subscribe(move |session| set_session.set(session.clone()));

    // Another tab signing in or out lands here; reload emits through the
    // same channel the mirror listens on, only when something changed.
    on_storage_event({
        let service = Arc::clone(&service);
        move || service.reload()
    });

    let ctx = SessionContext {
        service,
        session,
        _mirror: Arc::new(mirror),
    };
    provide_context(ctx.clone());
    ctx
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}
