//! Persisted session state and its change channel.
//!
//! The service owns the `{token, displayName}` pair stored in the browser's
//! key-value store and notifies subscribers on every mutation. Writes made by
//! this tab (`sign_in` / `sign_out`) and writes made by another tab (funneled
//! in through [`SessionService::reload`] by the storage listener) flow through
//! the same channel, so nav, guard and views observe one uniform stream of
//! session changes.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Storage keys shared with the backend-issued session. Other tabs of the
/// same origin read and write the same entries.
pub const TOKEN_KEY: &str = "token";
pub const DISPLAY_NAME_KEY: &str = "userName";

// =========================================================
// Session snapshot
// =========================================================

/// Immutable view of the persisted session. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub display_name: Option<String>,
}

impl Session {
    pub fn authenticated(token: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()).filter(|t| !t.is_empty()),
            display_name: Some(display_name.into()).filter(|n| !n.is_empty()),
        }
    }

    /// Token presence alone gates access; validity is the backend's call.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or_default()
    }

    /// Uppercased first letter of the display name, for the nav avatar.
    pub fn initial(&self) -> Option<char> {
        self.display_name
            .as_deref()?
            .trim()
            .chars()
            .next()
            .map(|c| c.to_uppercase().next().unwrap_or(c))
    }
}

// =========================================================
// Storage backend
// =========================================================

/// Key-value store the session persists through. The browser backend wraps
/// localStorage; tests drive the service with an in-memory map.
pub trait SessionStorage {
    fn read(&self, key: &str) -> Option<String>;
    /// Returns `false` when the store rejected the write.
    fn write(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str);
}

// =========================================================
// Service
// =========================================================

type Handler = Arc<dyn Fn(&Session) + Send + Sync>;
type HandlerMap = BTreeMap<usize, Handler>;

/// Owns the cached session and the subscriber list.
///
/// The cache is authoritative for this tab between reloads; persistent
/// storage is authoritative across tabs (last writer wins, no locking).
pub struct SessionService<S> {
    storage: S,
    current: Mutex<Session>,
    handlers: Arc<Mutex<HandlerMap>>,
    next_id: AtomicUsize,
}

impl<S: SessionStorage> SessionService<S> {
    /// Builds the service and primes the cache from persistent storage, so a
    /// session surviving from a previous visit is live immediately.
    pub fn new(storage: S) -> Self {
        let current = Mutex::new(Self::load(&storage));
        Self {
            storage,
            current,
            handlers: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: AtomicUsize::new(0),
        }
    }

    fn load(storage: &S) -> Session {
        let token = storage.read(TOKEN_KEY).filter(|v| !v.is_empty());
        let display_name = storage.read(DISPLAY_NAME_KEY).filter(|v| !v.is_empty());
        Session {
            token,
            display_name,
        }
    }

    /// Current snapshot. Never fails.
    pub fn current(&self) -> Session {
        self.lock_current().clone()
    }

    /// Persists a signed-in session and notifies subscribers. Storage
    /// rejections (quota, privacy mode) are swallowed; this tab still gets a
    /// working in-memory session.
    pub fn sign_in(&self, token: &str, display_name: &str) {
        self.storage.write(TOKEN_KEY, token);
        self.storage.write(DISPLAY_NAME_KEY, display_name);
        self.apply(Session::authenticated(token, display_name));
    }

    /// Removes both persisted fields and notifies subscribers.
    pub fn sign_out(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(DISPLAY_NAME_KEY);
        self.apply(Session::default());
    }

    /// Re-reads persisted state, emitting only when it differs from the
    /// cache. The cross-tab storage listener lands here; a tab that misses
    /// the event stays stale until its next reload.
    pub fn reload(&self) {
        let fresh = Self::load(&self.storage);
        let changed = fresh != *self.lock_current();
        if changed {
            self.apply(fresh);
        }
    }

    /// Registers `handler` for every session change until the returned
    /// subscription is dropped.
    pub fn subscribe(&self, handler: impl Fn(&Session) + Send + Sync + 'static) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.lock_handlers().insert(id, Arc::new(handler));
        Subscription {
            handlers: Arc::downgrade(&self.handlers),
            id,
        }
    }

    fn apply(&self, session: Session) {
        *self.lock_current() = session.clone();
        // Snapshot first so a handler may subscribe or unsubscribe without
        // deadlocking on the map.
        let snapshot: Vec<Handler> = self.lock_handlers().values().cloned().collect();
        for handler in &snapshot {
            handler(&session);
        }
    }

    fn lock_current(&self) -> MutexGuard<'_, Session> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_handlers(&self) -> MutexGuard<'_, HandlerMap> {
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Registration handle returned by [`SessionService::subscribe`]. Dropping it
/// unregisters the handler, so a view cannot leak handlers past unmount.
pub struct Subscription {
    handlers: Weak<Mutex<HandlerMap>>,
    id: usize,
}

impl Subscription {
    /// Explicit form of dropping the handle.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(handlers) = self.handlers.upgrade() {
            handlers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests;
